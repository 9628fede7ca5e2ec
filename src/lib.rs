//! EcoQuest - gamified eco-education progression engine.
//!
//! Users earn points through tasks, quizzes and two grid-exploration worlds,
//! with daily streaks and a shared leaderboard. A [`session::Session`] ties a
//! logged-in user to the [`ledger::Ledger`]; every point change flows through
//! the [`rewards::RewardDispatcher`].

pub mod activities;
pub mod auth;
pub mod core;
pub mod daily;
pub mod ledger;
pub mod maze;
pub mod proof;
pub mod rewards;
pub mod session;
pub mod utils;
