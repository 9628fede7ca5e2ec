use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

pub const ECO_FACTS: [&str; 7] = [
    "Recycling one aluminum can saves energy to run a TV for ~3 hours.",
    "1 L of water can correspond to ~1000 L in the lifecycle of some foods.",
    "Planting trees helps remove CO2 from air.",
    "Some plastics take ~1000 years to decompose.",
    "Solar energy reduces greenhouse emissions.",
    "Bees pollinate many of our crops.",
    "Composting reduces methane from landfills.",
];

pub const MOTIVATIONAL_MESSAGES: [&str; 4] = [
    "🌟 Keep it up!",
    "💚 Great job!",
    "♻️ You're making a difference!",
    "🌱 Amazing work!",
];

/// Fact of the day, keyed on day-of-year.
pub fn fact_for(date: NaiveDate) -> &'static str {
    ECO_FACTS[date.ordinal() as usize % ECO_FACTS.len()]
}

pub fn motivational_message<R: Rng>(rng: &mut R) -> &'static str {
    MOTIVATIONAL_MESSAGES
        .choose(rng)
        .copied()
        .unwrap_or(MOTIVATIONAL_MESSAGES[0])
}
