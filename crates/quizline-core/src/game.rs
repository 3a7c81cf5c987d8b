//! The trivia game state machine.
//!
//! `GameState` owns the questions, score, and countdown for one round and
//! moves through `Idle -> Playing -> Ended -> Idle`. It never sleeps or
//! spawns anything: the caller delivers timer ticks and answers, and the
//! state machine renders the result into a [`GameView`].

use tracing::debug;

use crate::error::GameError;
use crate::model::{Phase, Question, WRONG_ANSWER_PENALTY};
use crate::traits::GameView;

/// Upper bound for the countdown, in seconds (10 minutes).
pub const MAX_TIME_LIMIT_SECS: u32 = 600;

/// What happened to a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Nothing was selected; the game is unchanged.
    NoSelection,
    /// The answer was right and earned `awarded` points.
    Correct { awarded: i32 },
    /// The answer was wrong and cost `penalty` points.
    Incorrect { penalty: i32 },
}

/// What a timer tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown moved on and time remains.
    Running(u32),
    /// The countdown reached zero and the game ended.
    Expired,
    /// No game is running; the tick was dropped.
    Ignored,
}

/// State of a single trivia round.
#[derive(Debug, Clone)]
pub struct GameState {
    questions: Vec<Question>,
    current_index: usize,
    points: i32,
    seconds_remaining: u32,
    time_limit: u32,
    phase: Phase,
    timer_running: bool,
}

impl GameState {
    /// Create an idle game with the default 10 minute time limit.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current_index: 0,
            points: 0,
            seconds_remaining: MAX_TIME_LIMIT_SECS,
            time_limit: MAX_TIME_LIMIT_SECS,
            phase: Phase::Idle,
            timer_running: false,
        }
    }

    /// Set the countdown length, clamped to `MAX_TIME_LIMIT_SECS`.
    pub fn with_time_limit(mut self, seconds: u32) -> Self {
        self.time_limit = seconds.min(MAX_TIME_LIMIT_SECS);
        self.seconds_remaining = self.time_limit;
        self
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn points(&self) -> i32 {
        self.points
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    /// The question currently awaiting an answer, if the game is running.
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.questions.get(self.current_index)
    }

    /// Questions after the current one.
    pub fn questions_left(&self) -> usize {
        self.questions
            .len()
            .saturating_sub(self.current_index)
            .saturating_sub(1)
    }

    /// Replace the question list for the next round.
    pub fn load_questions(&mut self, questions: Vec<Question>) -> Result<(), GameError> {
        self.require(Phase::Idle, "load questions")?;
        self.questions = questions;
        self.current_index = 0;
        Ok(())
    }

    /// Begin a round: reset score and countdown and show the first question.
    pub fn start(&mut self, view: &mut dyn GameView) -> Result<(), GameError> {
        self.require(Phase::Idle, "start a game")?;
        if self.questions.is_empty() {
            return Err(GameError::NoQuestions);
        }

        self.points = 0;
        self.current_index = 0;
        self.seconds_remaining = self.time_limit;
        self.timer_running = true;
        self.phase = Phase::Playing;
        debug!(questions = self.questions.len(), "game started");

        view.show_game();
        view.set_status("");
        view.set_points(self.points);
        view.set_timer(self.seconds_remaining);
        self.show_current_question(view);
        Ok(())
    }

    /// Score the selected choice for the current question and move on.
    pub fn submit_answer(
        &mut self,
        choice: Option<usize>,
        view: &mut dyn GameView,
    ) -> Result<AnswerOutcome, GameError> {
        self.require(Phase::Playing, "submit an answer")?;

        let Some(index) = choice else {
            view.set_status("Please select an answer!");
            return Ok(AnswerOutcome::NoSelection);
        };

        let question = &self.questions[self.current_index];
        if index >= question.choices.len() {
            return Err(GameError::ChoiceOutOfRange {
                index,
                available: question.choices.len(),
            });
        }

        let outcome = if question.is_correct(index) {
            let awarded = question.difficulty.points();
            self.points += awarded;
            view.set_points(self.points);
            view.set_status(&format!(
                "Correct! Well done! You earned {awarded} points."
            ));
            AnswerOutcome::Correct { awarded }
        } else {
            self.points -= WRONG_ANSWER_PENALTY;
            view.set_points(self.points);
            view.set_status("Incorrect! Try harder!");
            AnswerOutcome::Incorrect {
                penalty: WRONG_ANSWER_PENALTY,
            }
        };
        debug!(index = self.current_index, ?outcome, "answer scored");

        self.current_index += 1;
        if self.current_index < self.questions.len() {
            self.show_current_question(view);
        } else {
            self.end(view)?;
        }
        Ok(outcome)
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self, view: &mut dyn GameView) -> Result<TickOutcome, GameError> {
        if self.phase != Phase::Playing || !self.timer_running {
            return Ok(TickOutcome::Ignored);
        }

        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        view.set_timer(self.seconds_remaining);

        if self.seconds_remaining == 0 {
            debug!("time is up");
            self.end(view)?;
            return Ok(TickOutcome::Expired);
        }
        Ok(TickOutcome::Running(self.seconds_remaining))
    }

    /// Stop the round, freeze the score, and report it.
    pub fn end(&mut self, view: &mut dyn GameView) -> Result<i32, GameError> {
        self.require(Phase::Playing, "end a game")?;

        self.timer_running = false;
        self.phase = Phase::Ended;
        debug!(points = self.points, "game ended");

        view.set_status(&format!("Game Over! You scored {} points.", self.points));
        view.set_next_enabled(false);
        Ok(self.points)
    }

    /// Return to the start screen after the end-of-game display delay.
    ///
    /// The final score stays readable through [`GameState::points`] until
    /// the next `start`.
    pub fn reset(&mut self, view: &mut dyn GameView) -> Result<(), GameError> {
        self.require(Phase::Ended, "reset")?;

        self.current_index = 0;
        self.seconds_remaining = self.time_limit;
        self.phase = Phase::Idle;

        view.show_start();
        view.set_next_enabled(false);
        view.set_timer(self.seconds_remaining);
        Ok(())
    }

    fn show_current_question(&self, view: &mut dyn GameView) {
        let question = &self.questions[self.current_index];
        view.show_question(question, self.current_index + 1, self.questions.len());
        view.set_questions_left(self.questions_left());
        view.set_next_enabled(true);
    }

    fn require(&self, phase: Phase, action: &'static str) -> Result<(), GameError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(GameError::InvalidPhase {
                action,
                phase: self.phase,
            })
        }
    }
}
