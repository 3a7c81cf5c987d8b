//! Open Trivia DB (opentdb.com) question source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::instrument;

use quizline_core::error::LoadError;
use quizline_core::model::{Difficulty, Question};
use quizline_core::traits::QuestionSource;

pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";
pub const DEFAULT_AMOUNT: u32 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Question source backed by the Open Trivia DB HTTP API.
#[derive(Debug)]
pub struct OpenTdbSource {
    url: Url,
    amount: u32,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OpenTdbSource {
    /// Create a source for `base_url` (the `api.php` endpoint). An empty
    /// string selects the public API.
    pub fn new(base_url: &str, amount: u32, timeout_secs: u64) -> Result<Self, LoadError> {
        let base = if base_url.is_empty() {
            DEFAULT_API_URL
        } else {
            base_url
        };
        let url = Url::parse(base)
            .map_err(|e| LoadError::Network(format!("invalid API URL '{base}': {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LoadError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url,
            amount,
            timeout_secs,
            client,
        })
    }

    /// The full request URL, including the `amount` query parameter.
    pub fn request_url(&self) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("amount", &self.amount.to_string());
        url
    }
}

#[derive(Deserialize)]
struct ApiResponse {
    response_code: i64,
    #[serde(default)]
    results: Vec<ApiQuestion>,
}

#[derive(Deserialize)]
struct ApiQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
    difficulty: String,
    #[serde(default)]
    category: String,
}

impl From<ApiQuestion> for Question {
    fn from(q: ApiQuestion) -> Self {
        let difficulty = Difficulty::parse_lenient(&q.difficulty.to_lowercase());
        Question::new(q.question, q.correct_answer, q.incorrect_answers, difficulty)
            .with_category(q.category)
    }
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    fn name(&self) -> &str {
        "opentdb"
    }

    #[instrument(skip(self), fields(amount = self.amount))]
    async fn fetch(&self) -> Result<Vec<Question>, LoadError> {
        let url = self.request_url();

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                LoadError::Network(format!("request timed out after {}s", self.timeout_secs))
            } else if e.is_connect() {
                LoadError::Network(format!("trivia API not reachable at {}", self.url))
            } else {
                LoadError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Network(format!(
                "HTTP {} from {}",
                status.as_u16(),
                self.url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Network(format!("failed to read response: {e}")))?;
        let api_response: ApiResponse = serde_json::from_str(&body)
            .map_err(|e| LoadError::InvalidData(format!("failed to parse response: {e}")))?;

        if api_response.response_code != 0 {
            return Err(LoadError::response_code(api_response.response_code));
        }

        Ok(api_response.results.into_iter().map(Question::from).collect())
    }
}
