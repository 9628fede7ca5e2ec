//! Quiz and crossword rounds.
//!
//! Rounds are sampled from fixed banks. Scoring is pure; the session decides
//! whether a round is still available and dispatches the points.

use crate::core::constants::{
    CROSSWORD_CLUES_PER_ROUND, CROSSWORD_REWARD, QUIZ_CORRECT_REWARD, QUIZ_QUESTIONS_PER_ROUND,
};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizQuestion {
    pub prompt: &'static str,
    pub options: [&'static str; 3],
    pub answer: &'static str,
}

impl QuizQuestion {
    /// Accepts the option text (case-insensitive) or its 1-based number.
    pub fn is_correct(&self, response: &str) -> bool {
        let response = response.trim();
        let chosen = match response.parse::<usize>() {
            Ok(n) => n.checked_sub(1).and_then(|i| self.options.get(i)).copied(),
            Err(_) => Some(response),
        };
        chosen.is_some_and(|c| c.eq_ignore_ascii_case(self.answer))
    }
}

pub const QUIZ_BANK: [QuizQuestion; 5] = [
    QuizQuestion {
        prompt: "What should you do with a plastic bottle?",
        options: ["Recycle", "Burn", "Dump"],
        answer: "Recycle",
    },
    QuizQuestion {
        prompt: "Which energy source is renewable?",
        options: ["Solar", "Coal", "Oil"],
        answer: "Solar",
    },
    QuizQuestion {
        prompt: "Which helps reduce CO2?",
        options: ["Plant trees", "Drive car", "Burn trash"],
        answer: "Plant trees",
    },
    QuizQuestion {
        prompt: "Which is compostable?",
        options: ["Banana peel", "Plastic bag", "Aluminum can"],
        answer: "Banana peel",
    },
    QuizQuestion {
        prompt: "Which saves water?",
        options: ["Fix leaks", "Let taps run", "Water lawn at noon"],
        answer: "Fix leaks",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
    pub points: u32,
}

pub fn sample_quiz<R: Rng>(rng: &mut R) -> Vec<QuizQuestion> {
    QUIZ_BANK
        .choose_multiple(rng, QUIZ_QUESTIONS_PER_ROUND)
        .copied()
        .collect()
}

/// Scores answers positionally. Missing answers count as wrong.
pub fn score_quiz(questions: &[QuizQuestion], answers: &[String]) -> QuizScore {
    let correct = questions
        .iter()
        .zip(answers)
        .filter(|(q, a)| q.is_correct(a))
        .count();
    QuizScore {
        correct,
        total: questions.len(),
        points: correct as u32 * QUIZ_CORRECT_REWARD,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrosswordClue {
    pub word: &'static str,
    pub clue: &'static str,
}

pub const CROSSWORD_BANK: [CrosswordClue; 6] = [
    CrosswordClue {
        word: "SUSTAINABILITY",
        clue: "Long-term balance of nature and resources",
    },
    CrosswordClue {
        word: "RECYCLE",
        clue: "You should do this with bottles, cans and paper ♻️",
    },
    CrosswordClue {
        word: "WATER",
        clue: "Covers 70% of Earth but drinkable part is limited 💧",
    },
    CrosswordClue {
        word: "GREEN",
        clue: "Color often associated with eco-friendly living 🌱",
    },
    CrosswordClue {
        word: "SOLAR",
        clue: "Clean energy from the Sun ☀️",
    },
    CrosswordClue {
        word: "TREE",
        clue: "Provides shade, habitat and oxygen 🌳",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrosswordScore {
    pub correct: usize,
    pub total: usize,
}

impl CrosswordScore {
    pub fn solved(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }

    /// All-or-nothing reward.
    pub fn points(&self) -> u32 {
        if self.solved() {
            CROSSWORD_REWARD
        } else {
            0
        }
    }
}

pub fn sample_crossword<R: Rng>(rng: &mut R) -> Vec<CrosswordClue> {
    CROSSWORD_BANK
        .choose_multiple(rng, CROSSWORD_CLUES_PER_ROUND)
        .copied()
        .collect()
}

pub fn check_crossword(clues: &[CrosswordClue], answers: &[String]) -> CrosswordScore {
    let correct = clues
        .iter()
        .zip(answers)
        .filter(|(c, a)| a.trim().eq_ignore_ascii_case(c.word))
        .count();
    CrosswordScore {
        correct,
        total: clues.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn answers(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sample_quiz_distinct_questions() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let round = sample_quiz(&mut rng);
        assert_eq!(round.len(), 3);
        let prompts: HashSet<_> = round.iter().map(|q| q.prompt).collect();
        assert_eq!(prompts.len(), 3);
    }

    #[test]
    fn test_quiz_answer_by_text_or_number() {
        let q = QUIZ_BANK[1];
        assert!(q.is_correct("solar"));
        assert!(q.is_correct(" 1 "));
        assert!(!q.is_correct("2"));
        assert!(!q.is_correct("4"));
        assert!(!q.is_correct("Coal"));
    }

    #[test]
    fn test_score_quiz() {
        let questions = [QUIZ_BANK[0], QUIZ_BANK[1], QUIZ_BANK[2]];
        let score = score_quiz(&questions, &answers(&["Recycle", "Oil"]));
        assert_eq!(score.correct, 1);
        assert_eq!(score.total, 3);
        assert_eq!(score.points, 2);
    }

    #[test]
    fn test_crossword_all_or_nothing() {
        let clues = [CROSSWORD_BANK[3], CROSSWORD_BANK[4]];
        let partial = check_crossword(&clues, &answers(&["green", "lunar"]));
        assert_eq!(partial.correct, 1);
        assert_eq!(partial.points(), 0);

        let full = check_crossword(&clues, &answers(&[" Green", "SOLAR"]));
        assert!(full.solved());
        assert_eq!(full.points(), 10);
    }

    #[test]
    fn test_sample_crossword_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let clues = sample_crossword(&mut rng);
        assert_eq!(clues.len(), 5);
        let words: HashSet<_> = clues.iter().map(|c| c.word).collect();
        assert_eq!(words.len(), 5);
    }
}
