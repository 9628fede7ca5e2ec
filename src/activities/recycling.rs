//! Recycling choice game: pick the right action for a scenario.

use crate::core::constants::RECYCLING_CHOICE_REWARD;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecyclingScenario {
    pub situation: &'static str,
    pub choices: [&'static str; 3],
}

pub const RECYCLING_SCENARIOS: [RecyclingScenario; 3] = [
    RecyclingScenario {
        situation: "You find a plastic bottle in the park.",
        choices: ["Recycle", "Burn", "Dump"],
    },
    RecyclingScenario {
        situation: "You have banana peels after lunch.",
        choices: ["Recycle", "Compost", "Burn"],
    },
    RecyclingScenario {
        situation: "You find an empty tin can.",
        choices: ["Recycle", "Trash", "Burn"],
    },
];

const GOOD_CHOICES: [&str; 2] = ["Recycle", "Compost"];

impl RecyclingScenario {
    /// Resolve a response (text or 1-based number) to one of the choices.
    pub fn resolve(&self, response: &str) -> Option<&'static str> {
        let response = response.trim();
        if let Ok(n) = response.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| self.choices.get(i)).copied();
        }
        self.choices
            .iter()
            .find(|c| c.eq_ignore_ascii_case(response))
            .copied()
    }
}

pub fn pick_scenario<R: Rng>(rng: &mut R) -> RecyclingScenario {
    *RECYCLING_SCENARIOS
        .choose(rng)
        .unwrap_or(&RECYCLING_SCENARIOS[0])
}

/// Points for a resolved choice.
pub fn choice_reward(choice: &str) -> u32 {
    if GOOD_CHOICES.iter().any(|good| *good == choice) {
        RECYCLING_CHOICE_REWARD
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_choice() {
        let scenario = RECYCLING_SCENARIOS[1];
        assert_eq!(scenario.resolve("compost"), Some("Compost"));
        assert_eq!(scenario.resolve("3"), Some("Burn"));
        assert_eq!(scenario.resolve("Trash"), None);
    }

    #[test]
    fn test_choice_reward() {
        assert_eq!(choice_reward("Recycle"), 3);
        assert_eq!(choice_reward("Compost"), 3);
        assert_eq!(choice_reward("Dump"), 0);
    }
}
