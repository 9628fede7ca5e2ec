//! Sorted, read-only view over the leaderboard index.

use super::types::{title_for_points, LeaderboardEntry};
use std::cmp::Ordering;

/// One line of the ranked leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry<'a> {
    /// 1-based position
    pub position: usize,
    pub username: &'a str,
    pub points: u32,
    pub title: &'static str,
}

/// Snapshot of the leaderboard in rank order.
///
/// `iter()` may be called any number of times; titles are computed as the
/// iterator advances and are never stored.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    entries: Vec<LeaderboardEntry>,
}

/// Points descending, then username ascending.
pub fn rank_order(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| a.username.cmp(&b.username))
}

impl Ranking {
    pub fn new(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(rank_order);
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = RankedEntry<'_>> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| RankedEntry {
                position: i + 1,
                username: &entry.username,
                points: entry.points,
                title: title_for_points(entry.points),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Points recorded for `username`, if present.
    pub fn points_of(&self, username: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.username == username)
            .map(|e| e.points)
    }

    /// Position of `username` in rank order.
    pub fn position_of(&self, username: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.username == username)
            .map(|i| i + 1)
    }
}
