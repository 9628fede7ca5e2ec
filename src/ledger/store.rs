//! Storage backends for the progress ledger and leaderboard index.
//!
//! Both tables live behind one lock per store so that a progress upsert and
//! its leaderboard upsert are a single step: no reader ever observes one
//! without the other. For the file store that lock is an OS lock on a sibling
//! `.lock` file, shared by every handle and process using the same path.

use super::records::{decode_leaderboard, decode_progress, ProgressRow, StoreFile};
use super::types::{LeaderboardEntry, UserProfile};
use crate::core::constants::STORE_VERSION;
use crate::utils::persistence::write_atomic;
use fd_lock::RwLock;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Keyed, transactional storage for progress rows.
///
/// Implementations must apply `upsert` and `reset` to the progress row and
/// the leaderboard row together, keyed by username, without touching other
/// users' rows.
pub trait ProgressStore: Send + Sync {
    fn get(&self, username: &str) -> io::Result<Option<UserProfile>>;

    /// Insert `profile` if the username is unknown. Returns true if inserted.
    fn insert_if_absent(&self, profile: &UserProfile) -> io::Result<bool>;

    /// Write the progress row and its leaderboard entry.
    fn upsert(&self, profile: &UserProfile) -> io::Result<()>;

    fn leaderboard(&self) -> io::Result<Vec<LeaderboardEntry>>;

    fn usernames(&self) -> io::Result<Vec<String>>;
}

/// In-memory copy of both tables.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub progress: BTreeMap<String, UserProfile>,
    pub leaderboard: BTreeMap<String, u32>,
}

impl Tables {
    fn upsert(&mut self, profile: &UserProfile) {
        self.progress
            .insert(profile.username.clone(), profile.clone());
        self.leaderboard
            .insert(profile.username.clone(), profile.points);
    }

    fn insert_if_absent(&mut self, profile: &UserProfile) -> bool {
        if self.progress.contains_key(&profile.username) {
            return false;
        }
        self.upsert(profile);
        true
    }

    fn entries(&self) -> Vec<LeaderboardEntry> {
        self.leaderboard
            .iter()
            .map(|(username, &points)| LeaderboardEntry {
                username: username.clone(),
                points,
            })
            .collect()
    }

    fn from_file(file: StoreFile) -> Self {
        let mut tables = Tables::default();
        for row in &file.progress {
            if let Some(profile) = decode_progress(row) {
                tables.progress.insert(profile.username.clone(), profile);
            }
        }
        for row in &file.leaderboard {
            if let Some(entry) = decode_leaderboard(row) {
                tables.leaderboard.insert(entry.username, entry.points);
            }
        }
        tables
    }

    fn to_file(&self) -> io::Result<StoreFile> {
        let to_value = |e: serde_json::Error| io::Error::new(io::ErrorKind::InvalidData, e);
        let progress = self
            .progress
            .values()
            .map(|p| serde_json::to_value(ProgressRow::from(p)).map_err(to_value))
            .collect::<io::Result<Vec<_>>>()?;
        let leaderboard = self
            .entries()
            .iter()
            .map(|e| serde_json::to_value(e).map_err(to_value))
            .collect::<io::Result<Vec<_>>>()?;
        Ok(StoreFile {
            version: STORE_VERSION,
            progress,
            leaderboard,
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> io::Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| io::Error::new(io::ErrorKind::Other, "progress store lock poisoned"))
}

/// Volatile store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, username: &str) -> io::Result<Option<UserProfile>> {
        Ok(lock(&self.tables)?.progress.get(username).cloned())
    }

    fn insert_if_absent(&self, profile: &UserProfile) -> io::Result<bool> {
        Ok(lock(&self.tables)?.insert_if_absent(profile))
    }

    fn upsert(&self, profile: &UserProfile) -> io::Result<()> {
        lock(&self.tables)?.upsert(profile);
        Ok(())
    }

    fn leaderboard(&self) -> io::Result<Vec<LeaderboardEntry>> {
        Ok(lock(&self.tables)?.entries())
    }

    fn usernames(&self) -> io::Result<Vec<String>> {
        Ok(lock(&self.tables)?.progress.keys().cloned().collect())
    }
}

/// Store backed by a single `progress.json` holding both tables.
///
/// Every operation re-reads the file while holding `progress.json.lock`, and
/// every write replaces the file atomically. Sessions in other handles or
/// other processes therefore merge at row level (last writer wins per
/// username) instead of clobbering each other's rows.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl JsonFileStore {
    /// Open the store, writing an empty file with the header if none exists.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut lock_path = path.as_os_str().to_owned();
        lock_path.push(".lock");
        let store = Self {
            path,
            lock_path: PathBuf::from(lock_path),
        };

        {
            let mut file_lock = store.lock_file()?;
            let _held = file_lock.write()?;
            if !store.path.exists() {
                log::info!("[LEDGER] bootstrapping {}", store.path.display());
                store.write(&Tables::default())?;
            } else {
                // Surface an unreadable file now rather than on the first reward.
                store.read()?;
            }
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A fresh descriptor on the lock file. Each call opens its own, so the
    /// OS lock also serializes threads sharing one handle.
    fn lock_file(&self) -> io::Result<RwLock<File>> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&self.lock_path)?;
        Ok(RwLock::new(file))
    }

    fn read(&self) -> io::Result<Tables> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Tables::default()),
            Err(e) => return Err(e),
        };
        let file: StoreFile = serde_json::from_str(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if file.version != STORE_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid store version: expected {}, got {}",
                    STORE_VERSION, file.version
                ),
            ));
        }
        Ok(Tables::from_file(file))
    }

    fn write(&self, tables: &Tables) -> io::Result<()> {
        let json = serde_json::to_string_pretty(&tables.to_file()?)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        write_atomic(&self.path, json.as_bytes())
    }

    /// Read the tables under a shared lock.
    fn snapshot(&self) -> io::Result<Tables> {
        let file_lock = self.lock_file()?;
        let _held = file_lock.read()?;
        self.read()
    }

    /// Read, modify and write back under the exclusive lock. Nothing is
    /// written when `f` returns false.
    fn transact(&self, f: impl FnOnce(&mut Tables) -> bool) -> io::Result<bool> {
        let mut file_lock = self.lock_file()?;
        let _held = file_lock.write()?;
        let mut tables = self.read()?;
        let changed = f(&mut tables);
        if changed {
            self.write(&tables)?;
        }
        Ok(changed)
    }
}

impl ProgressStore for JsonFileStore {
    fn get(&self, username: &str) -> io::Result<Option<UserProfile>> {
        Ok(self.snapshot()?.progress.remove(username))
    }

    fn insert_if_absent(&self, profile: &UserProfile) -> io::Result<bool> {
        self.transact(|tables| tables.insert_if_absent(profile))
    }

    fn upsert(&self, profile: &UserProfile) -> io::Result<()> {
        self.transact(|tables| {
            tables.upsert(profile);
            true
        })?;
        Ok(())
    }

    fn leaderboard(&self) -> io::Result<Vec<LeaderboardEntry>> {
        Ok(self.snapshot()?.entries())
    }

    fn usernames(&self) -> io::Result<Vec<String>> {
        Ok(self.snapshot()?.progress.into_keys().collect())
    }
}
