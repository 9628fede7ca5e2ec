//! Grid exploration worlds: the walled land maze and the open water maze.

pub mod generation;
pub mod logic;
pub mod types;

pub use generation::*;
pub use logic::*;
pub use types::*;
