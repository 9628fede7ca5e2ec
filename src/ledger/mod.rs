//! Persistent per-user progress and the leaderboard projection.

pub mod leaderboard;
pub mod logic;
pub mod records;
pub mod store;
pub mod types;

pub use leaderboard::*;
pub use logic::*;
pub use store::*;
pub use types::*;
