//! Reward dispatch: the only path that changes a user's points.
//!
//! Every point-earning event goes through [`RewardDispatcher`], which applies
//! the change to a copy of the profile, persists it through the ledger, and
//! only then commits it to the caller's profile. A failed write leaves the
//! in-memory profile exactly as it was.

use crate::ledger::{Ledger, ProgressStore, UserProfile};
use std::io;

/// Outcome reported to the player after a grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardResult {
    pub points_gained: u32,
    pub total_points: u32,
    pub title: &'static str,
    /// Whether the ledger was written
    pub saved: bool,
}

pub struct RewardDispatcher<'l, S: ProgressStore> {
    ledger: &'l Ledger<S>,
}

impl<'l, S: ProgressStore> RewardDispatcher<'l, S> {
    pub fn new(ledger: &'l Ledger<S>) -> Self {
        Self { ledger }
    }

    /// Add `points` and persist. Zero points is allowed (fact reveal, empty
    /// spin) and only writes if the profile differs from the stored row.
    pub fn grant(&self, profile: &mut UserProfile, points: u32) -> io::Result<RewardResult> {
        self.grant_with(profile, points, |_| {})
    }

    /// Like [`grant`](Self::grant) but also applies `update` to the profile in
    /// the same write (daily flag, completed task, streak rollover).
    pub fn grant_with(
        &self,
        profile: &mut UserProfile,
        points: u32,
        update: impl FnOnce(&mut UserProfile),
    ) -> io::Result<RewardResult> {
        let mut next = profile.clone();
        update(&mut next);
        next.points = next.points.saturating_add(points);

        let stored = self.ledger.peek(&next.username)?;
        let changed = points > 0 || stored.as_ref() != Some(&next);
        if changed {
            self.ledger.save(&next)?;
        }
        if points > 0 {
            log::info!(
                "[REWARD] {} +{} total:{}",
                next.username,
                points,
                next.points
            );
        }

        *profile = next;
        Ok(RewardResult {
            points_gained: points,
            total_points: profile.points,
            title: profile.title(),
            saved: changed,
        })
    }
}
