//! Eco cards (repeatable) and photo tasks (one-time, proof required).

use crate::core::constants::PHOTO_TASK_REWARD;

/// Quick challenge that can be tapped any number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcoCard {
    pub title: &'static str,
    pub points: u32,
}

pub const ECO_CARDS: [EcoCard; 6] = [
    EcoCard {
        title: "Save Water Today",
        points: 2,
    },
    EcoCard {
        title: "Plant a Tree",
        points: 3,
    },
    EcoCard {
        title: "Recycle 3 Items",
        points: 3,
    },
    EcoCard {
        title: "Use Solar Energy",
        points: 4,
    },
    EcoCard {
        title: "Walk/Bike Instead of Driving",
        points: 2,
    },
    EcoCard {
        title: "Compost Organic Waste",
        points: 3,
    },
];

/// Task rewarded once per user after a photo upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoTask {
    pub name: &'static str,
    pub description: &'static str,
}

impl PhotoTask {
    pub fn reward(&self) -> u32 {
        PHOTO_TASK_REWARD
    }

    /// File-name-safe identifier: spaces become underscores.
    pub fn proof_id(&self) -> String {
        self.name.replace(' ', "_")
    }
}

pub const PHOTO_TASKS: [PhotoTask; 3] = [
    PhotoTask {
        name: "Plant a Tree",
        description: "Upload a photo while planting a tree",
    },
    PhotoTask {
        name: "Pack Eco Lunch",
        description: "Upload a photo of your reusable lunch",
    },
    PhotoTask {
        name: "Recycle Items",
        description: "Upload a photo of items you recycled",
    },
];

/// Looks a card up by title (case-insensitive) or 1-based index.
pub fn find_card(key: &str) -> Option<&'static EcoCard> {
    lookup(&ECO_CARDS, key, |card| card.title)
}

/// Looks a task up by name (case-insensitive) or 1-based index.
pub fn find_task(key: &str) -> Option<&'static PhotoTask> {
    lookup(&PHOTO_TASKS, key, |task| task.name)
}

fn lookup<T>(bank: &'static [T], key: &str, name: impl Fn(&T) -> &str) -> Option<&'static T> {
    let key = key.trim();
    if let Ok(index) = key.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| bank.get(i));
    }
    bank.iter().find(|&entry| name(entry).eq_ignore_ascii_case(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_card_by_title_or_index() {
        assert_eq!(find_card("use solar energy").map(|c| c.points), Some(4));
        assert_eq!(find_card("1").map(|c| c.title), Some("Save Water Today"));
        assert!(find_card("0").is_none());
        assert!(find_card("7").is_none());
        assert!(find_card("Fly a Kite").is_none());
    }

    #[test]
    fn test_find_task() {
        let task = find_task("Pack Eco Lunch").unwrap();
        assert_eq!(task.proof_id(), "Pack_Eco_Lunch");
        assert_eq!(task.reward(), 3);
        assert_eq!(find_task("3").map(|t| t.name), Some("Recycle Items"));
        assert!(find_task("Save Water Today").is_none());
    }
}
