//! Daily challenge flow through a file-backed session.

use chrono::NaiveDate;
use ecoquest::auth::StaticAuthenticator;
use ecoquest::core::{Activity, EcoConfig, EcoError};
use ecoquest::daily::DailyState;
use ecoquest::ledger::{JsonFileStore, Ledger};
use ecoquest::session::Session;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn scratch_dir(label: &str) -> PathBuf {
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "ecoquest-daily-{}-{}-{}",
        label,
        std::process::id(),
        id
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn auth() -> StaticAuthenticator {
    StaticAuthenticator::new().with_user("alice", "green")
}

fn login<'l>(
    ledger: &'l Ledger<JsonFileStore>,
    config: &EcoConfig,
    today: NaiveDate,
) -> Session<'l, JsonFileStore, ChaCha8Rng> {
    Session::login_with_rng(
        ledger,
        &auth(),
        config,
        "alice",
        "green",
        today,
        ChaCha8Rng::seed_from_u64(1),
    )
    .unwrap()
}

#[test]
fn test_first_daily_awards_three_then_refuses_repeat() {
    let dir = scratch_dir("alice");
    let config = EcoConfig::in_dir(&dir);
    let ledger = Ledger::open(&config).unwrap();
    let mut session = login(&ledger, &config, day(5, 1));

    assert_eq!(session.profile().streak, 1);
    assert_eq!(session.daily_state(), DailyState::Fresh);

    let outcome = session.submit_daily(b"photo", day(5, 1)).unwrap();
    assert_eq!(outcome.reward.points_gained, 3);
    assert_eq!(outcome.reward.total_points, 3);
    assert_eq!(
        outcome.proof.path,
        dir.join("uploads").join("alice_daily_2024-05-01.png")
    );
    assert_eq!(session.daily_state(), DailyState::Completed);

    let repeat = session.submit_daily(b"photo", day(5, 1));
    assert!(matches!(
        repeat,
        Err(EcoError::AlreadyCompleted(Activity::DailyChallenge))
    ));

    let stored = ledger.load("alice").unwrap();
    assert_eq!(stored.points, 3);
    assert!(stored.daily_done);
    assert_eq!(ledger.ranked().unwrap().points_of("alice"), Some(3));
}

#[test]
fn test_streak_grows_on_consecutive_days_and_restarts_after_gap() {
    let dir = scratch_dir("streak");
    let config = EcoConfig::in_dir(&dir);
    let ledger = Ledger::open(&config).unwrap();

    let mut monday = login(&ledger, &config, day(5, 6));
    monday.submit_daily(b"p", day(5, 6)).unwrap();

    let mut tuesday = login(&ledger, &config, day(5, 7));
    assert_eq!(tuesday.profile().streak, 2);
    assert_eq!(tuesday.daily_state(), DailyState::Fresh);
    let reward = tuesday.submit_daily(b"p", day(5, 7)).unwrap().reward;
    assert_eq!(reward.points_gained, 4);
    assert_eq!(reward.total_points, 7);

    let friday = login(&ledger, &config, day(5, 10));
    assert_eq!(friday.profile().streak, 1);
    assert_eq!(ledger.load("alice").unwrap().streak, 1);
}

#[test]
fn test_session_spanning_midnight_rolls_over_on_submit() {
    let dir = scratch_dir("midnight");
    let config = EcoConfig::in_dir(&dir);
    let ledger = Ledger::open(&config).unwrap();
    let mut session = login(&ledger, &config, day(5, 1));

    session.submit_daily(b"p", day(5, 1)).unwrap();
    let next = session.submit_daily(b"p", day(5, 2)).unwrap();

    assert_eq!(session.profile().streak, 2);
    assert_eq!(next.reward.points_gained, 4);
    assert_eq!(ledger.load("alice").unwrap().points, 7);
}

#[test]
fn test_wrong_password_leaves_store_untouched() {
    let dir = scratch_dir("auth");
    let config = EcoConfig::in_dir(&dir);
    let ledger = Ledger::open(&config).unwrap();

    let result = Session::login(&ledger, &auth(), &config, "alice", "brown", day(5, 1));

    assert!(matches!(result, Err(EcoError::Auth)));
    assert!(ledger.profiles().unwrap().is_empty());
}

#[test]
fn test_empty_proof_is_rejected_without_reward() {
    let dir = scratch_dir("empty-proof");
    let config = EcoConfig::in_dir(&dir);
    let ledger = Ledger::open(&config).unwrap();
    let mut session = login(&ledger, &config, day(5, 1));

    let result = session.submit_daily(b"", day(5, 1));

    assert!(matches!(result, Err(EcoError::InvalidInput(_))));
    assert_eq!(session.daily_state(), DailyState::Fresh);
    assert_eq!(ledger.load("alice").unwrap().points, 0);
}
