//! Spin the wheel: one spin per calendar day.

use chrono::NaiveDate;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinPrize {
    pub label: &'static str,
    pub points: u32,
}

pub const SPIN_PRIZES: [SpinPrize; 6] = [
    SpinPrize {
        label: "+5 Points 🌱",
        points: 5,
    },
    SpinPrize {
        label: "+10 Points 💧",
        points: 10,
    },
    SpinPrize {
        label: "Eco Fact 💡: Recycling 1 ton of paper saves 17 trees!",
        points: 0,
    },
    SpinPrize {
        label: "Challenge 🎯: Plant a tree this week!",
        points: 0,
    },
    SpinPrize {
        label: "Jackpot 🎉 +20 Points!",
        points: 20,
    },
    SpinPrize {
        label: "Try Again 🔄",
        points: 0,
    },
];

pub fn can_spin(last_spin: Option<NaiveDate>, today: NaiveDate) -> bool {
    last_spin != Some(today)
}

/// Uniform pick over the wheel segments.
pub fn spin_wheel<R: Rng>(rng: &mut R) -> SpinPrize {
    SPIN_PRIZES[rng.gen_range(0..SPIN_PRIZES.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_one_spin_per_day() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(can_spin(None, today));
        assert!(!can_spin(Some(today), today));
        assert!(can_spin(today.pred_opt(), today));
    }

    #[test]
    fn test_every_segment_reachable() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut seen = [false; 6];
        for _ in 0..500 {
            let prize = spin_wheel(&mut rng);
            let index = SPIN_PRIZES.iter().position(|p| *p == prize).unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
