//! In-memory question source.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use quizline_core::error::LoadError;
use quizline_core::model::Question;
use quizline_core::traits::QuestionSource;

/// A source that hands out the same fixed question list on every fetch.
///
/// Used to drive the round loop in tests without an HTTP server.
pub struct StaticSource {
    questions: Vec<Question>,
    fetch_count: AtomicU32,
}

impl StaticSource {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            fetch_count: AtomicU32::new(0),
        }
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl QuestionSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> Result<Vec<Question>, LoadError> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        if self.questions.is_empty() {
            return Err(LoadError::InvalidData("no questions configured".into()));
        }
        Ok(self.questions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizline_core::model::Difficulty;

    #[tokio::test]
    async fn returns_same_questions_each_time() {
        let source = StaticSource::new(vec![Question::new(
            "2 + 2?",
            "4",
            vec!["3".to_string(), "5".to_string(), "22".to_string()],
            Difficulty::Easy,
        )]);

        let first = source.fetch().await.unwrap();
        let second = source.fetch().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn empty_list_is_invalid() {
        let source = StaticSource::new(vec![]);
        assert!(matches!(
            source.fetch().await,
            Err(LoadError::InvalidData(_))
        ));
    }
}
