//! Line-oriented terminal view.

use std::io::Write;

use tracing::warn;

use quizline_core::model::Question;
use quizline_core::traits::GameView;
use quizline_core::view::{
    decode_html_entities, points_text, questions_left_text, status_text, timer_text,
};

/// Renders the game as plain lines on a writer (stdout in the binary).
///
/// The countdown is printed when a round starts, on every full minute,
/// and for the last ten seconds rather than on every tick.
pub struct ConsoleView<W: Write + Send> {
    out: W,
    choice_count: usize,
    timer_shown: bool,
    write_failed: bool,
}

impl<W: Write + Send> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            choice_count: 0,
            timer_shown: false,
            write_failed: false,
        }
    }

    /// Print a free-form message outside the game surface.
    pub fn message(&mut self, text: &str) {
        self.line(text);
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        let result = writeln!(self.out, "{text}").and_then(|()| self.out.flush());
        if let Err(e) = result {
            if !self.write_failed {
                warn!("failed to write to console: {e}");
                self.write_failed = true;
            }
        }
    }
}

impl<W: Write + Send> GameView for ConsoleView<W> {
    fn show_game(&mut self) {
        self.timer_shown = false;
        self.line("");
        self.line("=== quizline ===");
    }

    fn show_start(&mut self) {
        self.line("");
        self.line("=== start ===");
    }

    fn show_question(&mut self, question: &Question, number: usize, total: usize) {
        self.choice_count = question.choices.len();

        let mut header = format!("Question {number}/{total} [{}]", question.difficulty);
        if !question.category.is_empty() {
            header.push_str(&format!(" {}", decode_html_entities(&question.category)));
        }
        self.line("");
        self.line(&header);
        self.line(&decode_html_entities(&question.text));
        for (i, choice) in question.choices.iter().enumerate() {
            self.line(&format!("  {}) {}", i + 1, decode_html_entities(choice)));
        }
    }

    fn set_questions_left(&mut self, left: usize) {
        self.line(&questions_left_text(left));
    }

    fn set_points(&mut self, points: i32) {
        self.line(&points_text(points));
    }

    fn set_status(&mut self, message: &str) {
        if !message.is_empty() {
            self.line(&status_text(message));
        }
    }

    fn set_timer(&mut self, seconds_remaining: u32) {
        if !self.timer_shown || seconds_remaining % 60 == 0 || seconds_remaining <= 10 {
            self.timer_shown = true;
            self.line(&timer_text(seconds_remaining));
        }
    }

    fn set_next_enabled(&mut self, enabled: bool) {
        if enabled {
            let prompt = format!("Your answer (1-{}, q to quit):", self.choice_count);
            self.line(&prompt);
        }
    }
}
