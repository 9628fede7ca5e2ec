//! Progress ledger operations on top of a [`ProgressStore`].

use super::leaderboard::Ranking;
use super::store::{JsonFileStore, ProgressStore};
use super::types::UserProfile;
use crate::core::config::EcoConfig;
use std::io;

/// Authoritative per-user progress plus the leaderboard it feeds.
pub struct Ledger<S: ProgressStore> {
    store: S,
}

impl Ledger<JsonFileStore> {
    /// Ledger backed by `progress.json` in the configured data directory.
    pub fn open(config: &EcoConfig) -> io::Result<Self> {
        Ok(Self::new(JsonFileStore::open(config.progress_path()?)?))
    }
}

impl<S: ProgressStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a zeroed profile if the username is unknown. Idempotent.
    pub fn ensure(&self, username: &str) -> io::Result<()> {
        if self.store.insert_if_absent(&UserProfile::new(username))? {
            log::info!("[LEDGER] created profile for {}", username);
        }
        Ok(())
    }

    /// Current profile, creating it on first reference.
    pub fn load(&self, username: &str) -> io::Result<UserProfile> {
        if let Some(profile) = self.store.get(username)? {
            return Ok(profile);
        }
        self.ensure(username)?;
        Ok(self
            .store
            .get(username)?
            .unwrap_or_else(|| UserProfile::new(username)))
    }

    /// Stored row without creating one.
    pub fn peek(&self, username: &str) -> io::Result<Option<UserProfile>> {
        self.store.get(username)
    }

    /// Upsert every field and the leaderboard entry in one store transaction.
    pub fn save(&self, profile: &UserProfile) -> io::Result<()> {
        if profile.username.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "cannot save a profile without a username",
            ));
        }
        self.store.upsert(profile)?;
        log::debug!(
            "[LEDGER] saved {} points:{} streak:{}",
            profile.username,
            profile.points,
            profile.streak
        );
        Ok(())
    }

    /// Zero all progress for `username`, keeping the row, and return the
    /// zeroed profile.
    pub fn reset(&self, username: &str) -> io::Result<UserProfile> {
        let mut profile = self.load(username)?;
        let old_points = profile.points;
        profile.clear();
        self.store.upsert(&profile)?;
        log::info!(
            "[LEDGER] reset {} (had {} points)",
            username,
            old_points
        );
        Ok(profile)
    }

    /// Leaderboard in rank order.
    pub fn ranked(&self) -> io::Result<Ranking> {
        Ok(Ranking::new(self.store.leaderboard()?))
    }

    /// All known usernames.
    pub fn profiles(&self) -> io::Result<Vec<String>> {
        self.store.usernames()
    }
}
