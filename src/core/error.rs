//! Error types surfaced to the session layer.

use std::fmt;
use std::io;

/// One-time activities that refuse a repeat submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    DailyChallenge,
    PhotoTask(String),
    Quiz,
    Crossword,
    SpinWheel,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::DailyChallenge => write!(f, "today's challenge"),
            Activity::PhotoTask(task) => write!(f, "task '{}'", task),
            Activity::Quiz => write!(f, "the quiz"),
            Activity::Crossword => write!(f, "the crossword"),
            Activity::SpinWheel => write!(f, "today's spin"),
        }
    }
}

#[derive(Debug)]
pub enum EcoError {
    /// Username/password pair was rejected. No state changed.
    Auth,
    /// The activity was already completed in the current window (day or session).
    AlreadyCompleted(Activity),
    /// Task identifier not present in the task bank.
    UnknownTask(String),
    /// Caller supplied something the engine cannot act on.
    InvalidInput(String),
    /// Storage failure. Fatal to the triggering operation.
    Store(io::Error),
}

pub type EcoResult<T> = Result<T, EcoError>;

impl fmt::Display for EcoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcoError::Auth => write!(f, "Invalid credentials"),
            EcoError::AlreadyCompleted(activity) => {
                write!(f, "You've already completed {}", activity)
            }
            EcoError::UnknownTask(task) => write!(f, "Unknown task: {}", task),
            EcoError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            EcoError::Store(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for EcoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EcoError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for EcoError {
    fn from(e: io::Error) -> Self {
        EcoError::Store(e)
    }
}
