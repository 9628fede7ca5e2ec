//! Daily challenge cycle: streak continuity and one reward per calendar day.

pub mod logic;

pub use logic::*;
