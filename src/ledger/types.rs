//! Per-user progress record and leaderboard projection.

use crate::core::constants::{POINTS_PER_TITLE, TITLES};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Authoritative progress for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub points: u32,
    /// Consecutive calendar days with a login
    pub streak: u32,
    pub last_login: Option<NaiveDate>,
    pub daily_done: bool,
    /// Task ids whose one-time reward was granted, in completion order
    pub completed_tasks: Vec<String>,
}

impl UserProfile {
    /// Zeroed profile for a username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            points: 0,
            streak: 0,
            last_login: None,
            daily_done: false,
            completed_tasks: Vec::new(),
        }
    }

    pub fn has_completed(&self, task: &str) -> bool {
        self.completed_tasks.iter().any(|t| t == task)
    }

    /// Records a task; returns false if it was already present.
    pub fn mark_completed(&mut self, task: &str) -> bool {
        if self.has_completed(task) {
            return false;
        }
        self.completed_tasks.push(task.to_string());
        true
    }

    /// Zero everything except identity.
    pub fn clear(&mut self) {
        *self = Self::new(std::mem::take(&mut self.username));
    }

    pub fn title(&self) -> &'static str {
        title_for_points(self.points)
    }

    pub fn leaderboard_entry(&self) -> LeaderboardEntry {
        LeaderboardEntry {
            username: self.username.clone(),
            points: self.points,
        }
    }
}

/// Derived row of the leaderboard index. Never authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub points: u32,
}

/// Rank title for a score; cycles every 100 points.
pub fn title_for_points(points: u32) -> &'static str {
    let level = (points / POINTS_PER_TITLE) as usize;
    TITLES[level % TITLES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_is_zeroed() {
        let profile = UserProfile::new("alice");
        assert_eq!(profile.username, "alice");
        assert_eq!(profile.points, 0);
        assert_eq!(profile.streak, 0);
        assert!(profile.last_login.is_none());
        assert!(!profile.daily_done);
        assert!(profile.completed_tasks.is_empty());
    }

    #[test]
    fn test_mark_completed_is_unique() {
        let mut profile = UserProfile::new("alice");
        assert!(profile.mark_completed("Plant a Tree"));
        assert!(!profile.mark_completed("Plant a Tree"));
        assert_eq!(profile.completed_tasks, vec!["Plant a Tree".to_string()]);
    }

    #[test]
    fn test_clear_keeps_identity() {
        let mut profile = UserProfile::new("bob");
        profile.points = 50;
        profile.streak = 4;
        profile.daily_done = true;
        profile.last_login = NaiveDate::from_ymd_opt(2024, 3, 1);
        profile.mark_completed("Recycle Items");

        profile.clear();

        assert_eq!(profile, UserProfile::new("bob"));
    }

    #[test]
    fn test_titles_cycle_every_hundred() {
        assert_eq!(title_for_points(0), "Hero 🌱");
        assert_eq!(title_for_points(99), "Hero 🌱");
        assert_eq!(title_for_points(100), "Star ⭐");
        assert_eq!(title_for_points(250), "Superstar 🌟");
        assert_eq!(title_for_points(399), "Legend 🌍");
        assert_eq!(title_for_points(400), "Hero 🌱");
    }
}
