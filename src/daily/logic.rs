//! Date rollover and daily reward rules.
//!
//! These functions only mutate the profile; the session persists the result
//! through the reward dispatcher.

use crate::ledger::UserProfile;
use chrono::{Datelike, NaiveDate};

/// Prompts shown for the photo-proof daily challenge.
pub const DAILY_CHALLENGES: [&str; 4] = [
    "Turn off lights today!",
    "Use reusable bottles!",
    "Plant a tree!",
    "Recycle 3 items!",
];

/// Whether today's reward is still available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyState {
    /// Reward available
    Fresh,
    /// Reward already claimed today
    Completed,
}

/// What `evaluate` did to the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rollover {
    /// `last_login` is already today; nothing changed
    SameDay,
    /// Logged in yesterday; streak extended
    Continued { streak: u32 },
    /// Gap of more than a day (or no previous login); streak restarted at 1
    Restarted { previous_streak: u32 },
}

impl Rollover {
    pub fn changed(&self) -> bool {
        !matches!(self, Rollover::SameDay)
    }
}

/// Apply the date transition for `today`.
///
/// A new day clears `daily_done`, extends the streak if the previous login
/// was exactly yesterday and restarts it at 1 otherwise.
pub fn evaluate(profile: &mut UserProfile, today: NaiveDate) -> Rollover {
    if profile.last_login == Some(today) {
        return Rollover::SameDay;
    }

    let yesterday = today.pred_opt();
    let continued = profile.last_login.is_some() && profile.last_login == yesterday;

    profile.daily_done = false;
    profile.last_login = Some(today);

    if continued {
        profile.streak = profile.streak.saturating_add(1);
        Rollover::Continued {
            streak: profile.streak,
        }
    } else {
        let previous_streak = profile.streak;
        profile.streak = 1;
        Rollover::Restarted { previous_streak }
    }
}

pub fn daily_state(profile: &UserProfile) -> DailyState {
    if profile.daily_done {
        DailyState::Completed
    } else {
        DailyState::Fresh
    }
}

/// Points for completing the daily challenge at the given streak.
pub fn daily_reward(base_reward: u32, streak: u32) -> u32 {
    base_reward.saturating_add(streak)
}

/// The challenge prompt for a given day. Stable for the whole day.
pub fn challenge_for(date: NaiveDate) -> &'static str {
    let index = date.num_days_from_ce().unsigned_abs() as usize % DAILY_CHALLENGES.len();
    DAILY_CHALLENGES[index]
}

/// Identifier used to name the day's photo proof.
pub fn proof_id(date: NaiveDate) -> String {
    format!("daily_{}", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_day_is_noop() {
        let mut profile = UserProfile::new("alice");
        profile.last_login = Some(day(2024, 5, 1));
        profile.streak = 4;
        profile.daily_done = true;
        let before = profile.clone();

        assert_eq!(evaluate(&mut profile, day(2024, 5, 1)), Rollover::SameDay);
        assert_eq!(profile, before);
    }

    #[test]
    fn test_consecutive_day_extends_streak() {
        let mut profile = UserProfile::new("alice");
        profile.last_login = Some(day(2024, 5, 1));
        profile.streak = 4;
        profile.daily_done = true;

        let result = evaluate(&mut profile, day(2024, 5, 2));

        assert_eq!(result, Rollover::Continued { streak: 5 });
        assert_eq!(profile.streak, 5);
        assert!(!profile.daily_done);
        assert_eq!(profile.last_login, Some(day(2024, 5, 2)));
    }

    #[test]
    fn test_month_and_year_boundaries_count_as_consecutive() {
        let mut profile = UserProfile::new("alice");
        profile.last_login = Some(day(2023, 12, 31));
        profile.streak = 1;
        evaluate(&mut profile, day(2024, 1, 1));
        assert_eq!(profile.streak, 2);

        profile.last_login = Some(day(2024, 2, 29));
        evaluate(&mut profile, day(2024, 3, 1));
        assert_eq!(profile.streak, 3);
    }

    #[test]
    fn test_gap_restarts_streak() {
        let mut profile = UserProfile::new("alice");
        profile.last_login = Some(day(2024, 5, 1));
        profile.streak = 9;

        let result = evaluate(&mut profile, day(2024, 5, 3));

        assert_eq!(result, Rollover::Restarted { previous_streak: 9 });
        assert_eq!(profile.streak, 1);
    }

    #[test]
    fn test_first_login_starts_streak_at_one() {
        let mut profile = UserProfile::new("alice");
        evaluate(&mut profile, day(2024, 5, 1));
        assert_eq!(profile.streak, 1);
        assert_eq!(profile.last_login, Some(day(2024, 5, 1)));
    }

    #[test]
    fn test_clock_going_backwards_restarts_streak() {
        let mut profile = UserProfile::new("alice");
        profile.last_login = Some(day(2024, 5, 10));
        profile.streak = 3;
        evaluate(&mut profile, day(2024, 5, 9));
        assert_eq!(profile.streak, 1);
    }

    #[test]
    fn test_state_and_reward() {
        let mut profile = UserProfile::new("alice");
        assert_eq!(daily_state(&profile), DailyState::Fresh);
        profile.daily_done = true;
        assert_eq!(daily_state(&profile), DailyState::Completed);
        assert_eq!(daily_reward(2, 1), 3);
        assert_eq!(daily_reward(2, 7), 9);
    }

    #[test]
    fn test_challenge_stable_per_day() {
        let d = day(2024, 5, 1);
        assert_eq!(challenge_for(d), challenge_for(d));
        assert!(DAILY_CHALLENGES.contains(&challenge_for(d.succ_opt().unwrap())));
        assert_eq!(proof_id(d), "daily_2024-05-01");
    }
}
