//! Core data model types for quizline.
//!
//! Questions are kept exactly as the source delivered them (HTML entities
//! included); decoding for display is the view's job.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Points awarded for a correct easy answer.
pub const EASY_POINTS: i32 = 10;
/// Points awarded for a correct medium answer.
pub const MEDIUM_POINTS: i32 = 20;
/// Points awarded for a correct hard answer.
pub const HARD_POINTS: i32 = 40;
/// Points subtracted for a wrong answer.
pub const WRONG_ANSWER_PENALTY: i32 = 5;

/// A single trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    pub text: String,
    /// Answer choices, correct answer first, then the incorrect ones in
    /// the order they were received.
    pub choices: Vec<String>,
    /// The correct answer, compared by text against the chosen entry.
    pub correct_answer: String,
    /// How much a correct answer is worth.
    pub difficulty: Difficulty,
    /// Category name, empty when the source has none.
    #[serde(default)]
    pub category: String,
}

impl Question {
    /// Build a question with choices assembled as `[correct, ...incorrect]`.
    pub fn new(
        text: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: impl IntoIterator<Item = String>,
        difficulty: Difficulty,
    ) -> Self {
        let correct_answer = correct_answer.into();
        let mut choices = vec![correct_answer.clone()];
        choices.extend(incorrect_answers);
        Self {
            text: text.into(),
            choices,
            correct_answer,
            difficulty,
            category: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Returns `true` if the choice at `index` is the correct answer.
    ///
    /// Out-of-range indices are never correct.
    pub fn is_correct(&self, index: usize) -> bool {
        self.choices
            .get(index)
            .is_some_and(|choice| *choice == self.correct_answer)
    }
}

/// Question difficulty, which determines the score of a correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// Anything the source sent that is not one of the above.
    #[serde(other)]
    Unknown,
}

impl Difficulty {
    /// Lenient, case-insensitive parse; unrecognized values become `Unknown`.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Difficulty::Unknown)
    }

    /// Points for a correct answer at this difficulty.
    pub fn points(self) -> i32 {
        match self {
            Difficulty::Easy => EASY_POINTS,
            Difficulty::Medium => MEDIUM_POINTS,
            Difficulty::Hard => HARD_POINTS,
            Difficulty::Unknown => 0,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Points for a correct answer given a raw difficulty string.
///
/// Returns 10, 20 or 40 for easy, medium or hard (any case) and 0 for
/// anything else.
pub fn calculate_points(difficulty: &str) -> i32 {
    Difficulty::parse_lenient(difficulty).points()
}

/// Game lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Playing,
    Ended,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Playing => write!(f, "playing"),
            Phase::Ended => write!(f, "ended"),
        }
    }
}
