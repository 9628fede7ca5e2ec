//! Point-earning activities outside the mazes: eco cards, photo tasks, quiz,
//! crossword, recycling game, spin wheel and the daily fact.

pub mod facts;
pub mod quiz;
pub mod recycling;
pub mod spin;
pub mod tasks;

pub use facts::*;
pub use quiz::*;
pub use recycling::*;
pub use spin::*;
pub use tasks::*;
