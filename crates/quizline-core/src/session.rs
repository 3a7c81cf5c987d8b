//! Async round driver.
//!
//! Feeds a [`GameState`] from two event sources, a repeating one-second
//! countdown and a channel of player input, until the round ends. Then it
//! holds the final score on screen for the display delay and resets to
//! idle.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, sleep, Instant};
use tracing::{error, info, warn};

use crate::error::{GameError, LoadError};
use crate::game::{AnswerOutcome, GameState, TickOutcome};
use crate::model::{Phase, Question};
use crate::traits::{GameView, QuestionSource};

/// One action from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Submit the selected choice (0-based), or nothing if none is selected.
    Submit(Option<usize>),
    /// Leave the game.
    Quit,
}

/// Parse a line of player input.
///
/// A 1-based number selects that choice, `q` or `quit` leaves, and
/// anything else submits with no selection.
pub fn parse_input(line: &str) -> PlayerInput {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return PlayerInput::Quit;
    }
    let choice = line
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1));
    PlayerInput::Submit(choice)
}

/// Timing for a round.
#[derive(Debug, Clone)]
pub struct RoundConfig {
    /// Period of the countdown tick.
    pub tick_interval: Duration,
    /// How long the final score stays up before the game resets.
    pub end_delay: Duration,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            end_delay: Duration::from_secs(4),
        }
    }
}

/// Why a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Every question was answered.
    Completed,
    /// The countdown reached zero.
    TimeUp,
    /// The player quit or the input closed.
    Quit,
}

/// Outcome of one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub points: i32,
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub reason: EndReason,
}

/// Fetch questions for a round.
///
/// Failures are logged and returned; the caller leaves the game unstarted.
pub async fn fetch_questions(source: &dyn QuestionSource) -> Result<Vec<Question>, LoadError> {
    match source.fetch().await {
        Ok(questions) => {
            info!(source = source.name(), count = questions.len(), "questions loaded");
            Ok(questions)
        }
        Err(e) => {
            error!(source = source.name(), "problem fetching questions: {e}");
            Err(e)
        }
    }
}

/// Play one round to completion and reset the game to idle.
///
/// `state` must be idle with questions loaded. The countdown is dropped as
/// soon as the round ends, before the end delay starts.
pub async fn play_round(
    state: &mut GameState,
    inputs: &mut mpsc::Receiver<PlayerInput>,
    view: &mut dyn GameView,
    config: &RoundConfig,
) -> Result<RoundSummary, GameError> {
    state.start(view)?;

    let mut correct = 0usize;
    let mut incorrect = 0usize;
    let mut ticker = interval_at(Instant::now() + config.tick_interval, config.tick_interval);

    let reason = loop {
        tokio::select! {
            biased;

            input = inputs.recv() => match input {
                Some(PlayerInput::Submit(choice)) => {
                    match state.submit_answer(choice, view) {
                        Ok(AnswerOutcome::Correct { .. }) => correct += 1,
                        Ok(AnswerOutcome::Incorrect { .. }) => incorrect += 1,
                        Ok(AnswerOutcome::NoSelection) => {}
                        Err(GameError::ChoiceOutOfRange { index, available }) => {
                            warn!(index, available, "choice out of range");
                            view.set_status("Please select an answer!");
                        }
                        Err(e) => return Err(e),
                    }
                    if state.phase() == Phase::Ended {
                        break EndReason::Completed;
                    }
                }
                Some(PlayerInput::Quit) | None => {
                    state.end(view)?;
                    break EndReason::Quit;
                }
            },

            _ = ticker.tick() => {
                if state.tick(view)? == TickOutcome::Expired {
                    break EndReason::TimeUp;
                }
            }
        }
    };
    drop(ticker);

    let summary = RoundSummary {
        points: state.points(),
        answered: correct + incorrect,
        correct,
        incorrect,
        reason,
    };
    info!(points = summary.points, reason = ?summary.reason, "round over");

    sleep(config.end_delay).await;
    state.reset(view)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::model::Difficulty;
    use crate::view::{RecordingView, ViewEvent};

    fn ten_questions() -> Vec<Question> {
        let difficulties = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
        (0..10)
            .map(|i| {
                Question::new(
                    format!("question {i}"),
                    "yes",
                    vec!["no".to_string(), "maybe".to_string(), "never".to_string()],
                    difficulties[i % 3],
                )
            })
            .collect()
    }

    fn game_overs(view: &RecordingView) -> usize {
        view.count(|e| matches!(e, ViewEvent::Status(s) if s.starts_with("Game Over")))
    }

    #[test]
    fn parse_player_input() {
        assert_eq!(parse_input("1"), PlayerInput::Submit(Some(0)));
        assert_eq!(parse_input(" 4 \n"), PlayerInput::Submit(Some(3)));
        assert_eq!(parse_input(""), PlayerInput::Submit(None));
        assert_eq!(parse_input("0"), PlayerInput::Submit(None));
        assert_eq!(parse_input("abc"), PlayerInput::Submit(None));
        assert_eq!(parse_input("Q"), PlayerInput::Quit);
        assert_eq!(parse_input("quit"), PlayerInput::Quit);
    }

    #[tokio::test(start_paused = true)]
    async fn ten_answers_end_with_summed_score() {
        let mut state = GameState::new(ten_questions());
        let view = RecordingView::new();
        let (tx, mut rx) = mpsc::channel(16);

        // Wrong on the last question, right on the rest.
        for i in 0..10 {
            let choice = if i == 9 { 1 } else { 0 };
            tx.send(PlayerInput::Submit(Some(choice))).await.unwrap();
        }

        let started = Instant::now();
        let summary = play_round(&mut state, &mut rx, &mut view.clone(), &RoundConfig::default())
            .await
            .unwrap();

        // 3 easy + 3 medium + 3 hard correct, last (easy) wrong.
        assert_eq!(summary.points, 3 * 10 + 3 * 20 + 3 * 40 - 5);
        assert_eq!(summary.correct, 9);
        assert_eq!(summary.incorrect, 1);
        assert_eq!(summary.reason, EndReason::Completed);
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.points(), summary.points);
        assert!(started.elapsed() >= Duration::from_secs(4));
        assert_eq!(game_overs(&view), 1);
        assert_eq!(
            view.statuses().iter().filter(|s| s.starts_with("Correct!")).count(),
            9
        );
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_expiry_ends_round_once() {
        let mut state = GameState::new(ten_questions()).with_time_limit(5);
        let view = RecordingView::new();
        let (_tx, mut rx) = mpsc::channel(1);

        let summary = play_round(&mut state, &mut rx, &mut view.clone(), &RoundConfig::default())
            .await
            .unwrap();

        assert_eq!(summary.reason, EndReason::TimeUp);
        assert_eq!(summary.answered, 0);
        assert_eq!(summary.points, 0);
        // 5 at start, one render per tick, then the reset back to 5.
        assert_eq!(view.timer_values(), vec![5, 4, 3, 2, 1, 0, 5]);
        assert_eq!(game_overs(&view), 1);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_submission_prompts_without_scoring() {
        let mut state = GameState::new(ten_questions());
        let view = RecordingView::new();
        let (tx, mut rx) = mpsc::channel(4);
        tx.send(PlayerInput::Submit(None)).await.unwrap();
        tx.send(PlayerInput::Submit(Some(7))).await.unwrap();
        tx.send(PlayerInput::Quit).await.unwrap();

        let summary = play_round(&mut state, &mut rx, &mut view.clone(), &RoundConfig::default())
            .await
            .unwrap();

        assert_eq!(summary.reason, EndReason::Quit);
        assert_eq!(summary.points, 0);
        assert_eq!(summary.answered, 0);
        let prompts = view
            .statuses()
            .iter()
            .filter(|s| *s == "Please select an answer!")
            .count();
        assert_eq!(prompts, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_input_ends_round() {
        let mut state = GameState::new(ten_questions());
        let mut view = RecordingView::new();
        let (tx, mut rx) = mpsc::channel(4);
        tx.send(PlayerInput::Submit(Some(0))).await.unwrap();
        drop(tx);

        let config = RoundConfig {
            end_delay: Duration::ZERO,
            ..RoundConfig::default()
        };
        let summary = play_round(&mut state, &mut rx, &mut view, &config)
            .await
            .unwrap();

        assert_eq!(summary.reason, EndReason::Quit);
        assert_eq!(summary.points, 10);
        assert_eq!(summary.answered, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn round_requires_idle_game() {
        let mut state = GameState::new(vec![]);
        let mut view = RecordingView::new();
        let (_tx, mut rx) = mpsc::channel(1);

        let err = play_round(&mut state, &mut rx, &mut view, &RoundConfig::default())
            .await
            .unwrap_err();
        assert_eq!(err, GameError::NoQuestions);
    }

    struct FailingSource;

    #[async_trait]
    impl QuestionSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch(&self) -> Result<Vec<Question>, LoadError> {
            Err(LoadError::response_code(2))
        }
    }

    #[tokio::test]
    async fn failed_fetch_is_returned() {
        let err = fetch_questions(&FailingSource).await.unwrap_err();
        assert!(matches!(err, LoadError::InvalidData(_)));
    }
}
