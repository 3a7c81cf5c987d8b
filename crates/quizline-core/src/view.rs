//! Display text helpers and a recording view for tests.

use std::sync::{Arc, Mutex};

use crate::model::Question;
use crate::traits::GameView;

/// Format a second count as zero-padded `MM:SS`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn timer_text(seconds_remaining: u32) -> String {
    format!("Time left: {}", format_clock(seconds_remaining))
}

pub fn points_text(points: i32) -> String {
    format!("Points: {points}")
}

pub fn status_text(message: &str) -> String {
    format!("Current status: {message}")
}

pub fn questions_left_text(left: usize) -> String {
    format!("Questions left: {left}")
}

/// Decode the HTML entities trivia APIs embed in question text.
///
/// Handles the named entities that show up in practice plus decimal and
/// hex numeric references. Anything unrecognized is left untouched.
pub fn decode_html_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "hellip" => '\u{2026}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "eacute" => 'é',
        "Eacute" => 'É',
        "aacute" => 'á',
        "iacute" => 'í',
        "oacute" => 'ó',
        "uacute" => 'ú',
        "ntilde" => 'ñ',
        "ouml" => 'ö',
        "uuml" => 'ü',
        "auml" => 'ä',
        "szlig" => 'ß',
        "deg" => '°',
        "pi" => 'π',
        "shy" => '\u{ad}',
        _ => return None,
    };
    Some(c)
}

// ---------------------------------------------------------------------------
// Recording view
// ---------------------------------------------------------------------------

/// One call made on a [`RecordingView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    ShowGame,
    ShowStart,
    Question { text: String, number: usize, total: usize },
    QuestionsLeft(usize),
    Points(i32),
    Status(String),
    Timer(u32),
    NextEnabled(bool),
}

/// A view that records every call, for asserting on what the game rendered.
///
/// Clones share the same event log, so a test can keep one handle while
/// the round driver owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    events: Arc<Mutex<Vec<ViewEvent>>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events recorded so far.
    pub fn events(&self) -> Vec<ViewEvent> {
        self.lock().clone()
    }

    /// Status messages in the order they were set.
    pub fn statuses(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Status(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    /// The most recent status message, if any.
    pub fn last_status(&self) -> Option<String> {
        self.statuses().pop()
    }

    /// Timer values in the order they were rendered.
    pub fn timer_values(&self) -> Vec<u32> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Timer(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded events matching `pred`.
    pub fn count(&self, pred: impl Fn(&ViewEvent) -> bool) -> usize {
        self.lock().iter().filter(|e| pred(*e)).count()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ViewEvent>> {
        // A panic while holding the lock only happens inside a failing test.
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, event: ViewEvent) {
        self.lock().push(event);
    }
}

impl GameView for RecordingView {
    fn show_game(&mut self) {
        self.record(ViewEvent::ShowGame);
    }

    fn show_start(&mut self) {
        self.record(ViewEvent::ShowStart);
    }

    fn show_question(&mut self, question: &Question, number: usize, total: usize) {
        self.record(ViewEvent::Question {
            text: question.text.clone(),
            number,
            total,
        });
    }

    fn set_questions_left(&mut self, left: usize) {
        self.record(ViewEvent::QuestionsLeft(left));
    }

    fn set_points(&mut self, points: i32) {
        self.record(ViewEvent::Points(points));
    }

    fn set_status(&mut self, message: &str) {
        self.record(ViewEvent::Status(message.to_string()));
    }

    fn set_timer(&mut self, seconds_remaining: u32) {
        self.record(ViewEvent::Timer(seconds_remaining));
    }

    fn set_next_enabled(&mut self, enabled: bool) {
        self.record(ViewEvent::NextEnabled(enabled));
    }
}
