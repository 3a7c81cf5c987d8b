//! Core trait definitions for question sources and game views.
//!
//! Sources are implemented by `quizline-source`; the console view lives
//! in the CLI crate and the recording view in [`crate::view`].

use async_trait::async_trait;

use crate::error::LoadError;
use crate::model::Question;

// ---------------------------------------------------------------------------
// Question source trait
// ---------------------------------------------------------------------------

/// Trait for backends that supply a batch of questions for one round.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (e.g. "opentdb").
    fn name(&self) -> &str;

    /// Fetch and normalize a batch of questions.
    async fn fetch(&self) -> Result<Vec<Question>, LoadError>;
}

// ---------------------------------------------------------------------------
// Presentation trait
// ---------------------------------------------------------------------------

/// The surface the game state machine renders into.
///
/// Every method is a plain notification; a view never feeds state back
/// into the game. Player input travels separately through
/// [`crate::session::PlayerInput`].
pub trait GameView: Send {
    /// Hide the start container and show the game container.
    fn show_game(&mut self);

    /// Hide the game container and show the start container.
    fn show_start(&mut self);

    /// Render a question and its choices. `number` is 1-based.
    fn show_question(&mut self, question: &Question, number: usize, total: usize);

    /// Update the "Questions left" counter.
    fn set_questions_left(&mut self, left: usize);

    /// Update the "Points" text.
    fn set_points(&mut self, points: i32);

    /// Update the status line. An empty message clears it.
    fn set_status(&mut self, message: &str);

    /// Update the countdown display.
    fn set_timer(&mut self, seconds_remaining: u32);

    /// Enable or disable the control that submits an answer.
    fn set_next_enabled(&mut self, enabled: bool);
}
