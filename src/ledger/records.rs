//! On-disk row format for `progress.json`.
//!
//! Rows are written strictly typed and read leniently: a field that does not
//! decode is replaced by its default and logged, so one bad value never locks
//! a user out of their progress.

use super::types::{LeaderboardEntry, UserProfile};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Persisted progress row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRow {
    pub username: String,
    pub points: u32,
    pub streak: u32,
    /// ISO date or empty
    pub last_login: String,
    pub daily_done: bool,
    pub tasks_done: Vec<String>,
}

impl From<&UserProfile> for ProgressRow {
    fn from(profile: &UserProfile) -> Self {
        Self {
            username: profile.username.clone(),
            points: profile.points,
            streak: profile.streak,
            last_login: profile
                .last_login
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            daily_done: profile.daily_done,
            tasks_done: profile.completed_tasks.clone(),
        }
    }
}

/// Whole-file layout: header plus both tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreFile {
    pub version: u32,
    pub progress: Vec<Value>,
    pub leaderboard: Vec<Value>,
}

/// Decode one progress row. Returns None only when the row has no usable
/// username, since there is nothing to key it by.
pub fn decode_progress(row: &Value) -> Option<UserProfile> {
    let username = match row.get("username").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => {
            log::warn!("[LEDGER] skipping progress row without username: {}", row);
            return None;
        }
    };

    let mut profile = UserProfile::new(username);
    profile.points = decode_u32(row, "points", &profile.username);
    profile.streak = decode_u32(row, "streak", &profile.username);
    profile.last_login = decode_date(row.get("last_login"), &profile.username);
    profile.daily_done = decode_bool(row.get("daily_done"), &profile.username);
    profile.completed_tasks = decode_tasks(row.get("tasks_done"), &profile.username);
    Some(profile)
}

/// Decode one leaderboard row.
pub fn decode_leaderboard(row: &Value) -> Option<LeaderboardEntry> {
    let username = row.get("username").and_then(Value::as_str)?.to_string();
    let points = decode_u32(row, "points", &username);
    Some(LeaderboardEntry { username, points })
}

fn malformed(username: &str, field: &str, value: &Value) {
    log::warn!(
        "[LEDGER] malformed {} for {}: {} (using default)",
        field,
        username,
        value
    );
}

fn decode_u32(row: &Value, field: &str, username: &str) -> u32 {
    match row.get(field) {
        None | Some(Value::Null) => 0,
        Some(value) => match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(n) => n,
            None => {
                malformed(username, field, value);
                0
            }
        },
    }
}

fn decode_bool(value: Option<&Value>, username: &str) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            malformed(username, "daily_done", other);
            false
        }
    }
}

fn decode_date(value: Option<&Value>, username: &str) -> Option<NaiveDate> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => match NaiveDate::parse_from_str(s, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                malformed(username, "last_login", &Value::String(s.clone()));
                None
            }
        },
        Some(other) => {
            malformed(username, "last_login", other);
            None
        }
    }
}

/// Task list must be an array of strings; duplicates are dropped keeping the
/// first occurrence. Anything else yields an empty list.
fn decode_tasks(value: Option<&Value>, username: &str) -> Vec<String> {
    let items = match value {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => {
            malformed(username, "tasks_done", other);
            return Vec::new();
        }
    };

    let mut tasks: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(task) if !tasks.iter().any(|t| t == task) => tasks.push(task.to_string()),
            Some(_) => {}
            None => {
                malformed(username, "tasks_done", value.unwrap_or(&Value::Null));
                return Vec::new();
            }
        }
    }
    tasks
}
