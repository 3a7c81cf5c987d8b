//! Error types for loading questions and driving the game.
//!
//! `LoadError` is defined here rather than in `quizline-source` so the
//! round driver can report a failed fetch without depending on any
//! particular backend.

use thiserror::Error;

use crate::model::Phase;

/// Errors that can occur while fetching questions from a source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The request failed or the server answered with a non-success status.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered, but the payload is not usable.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl LoadError {
    /// The API signalled a non-zero `response_code`.
    pub fn response_code(code: i64) -> Self {
        LoadError::InvalidData(format!("API returned response code {code}"))
    }

    /// Returns `true` for transport-level failures.
    pub fn is_network(&self) -> bool {
        matches!(self, LoadError::Network(_))
    }
}

/// Errors returned by the game state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// The requested operation is not allowed in the current phase.
    #[error("cannot {action} while {phase}")]
    InvalidPhase { action: &'static str, phase: Phase },

    /// `start` was called with an empty question list.
    #[error("no questions loaded")]
    NoQuestions,

    /// The selected choice does not exist on the current question.
    #[error("choice {index} out of range (question has {available} choices)")]
    ChoiceOutOfRange { index: usize, available: usize },
}
