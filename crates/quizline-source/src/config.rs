//! Configuration loading and source factory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizline_core::game::MAX_TIME_LIMIT_SECS;
use quizline_core::session::RoundConfig;
use quizline_core::traits::QuestionSource;

use crate::opentdb::{OpenTdbSource, DEFAULT_AMOUNT, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

/// Largest batch the Open Trivia DB API serves in one request.
pub const MAX_AMOUNT: u32 = 50;

/// Top-level quizline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizlineConfig {
    /// Trivia API endpoint. `${VAR}` references are resolved on load.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Questions per round.
    #[serde(default = "default_amount")]
    pub amount: u32,
    /// Countdown length in seconds.
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u32,
    /// How long the final score is shown before the game resets.
    #[serde(default = "default_end_delay")]
    pub end_delay_secs: u64,
    /// HTTP request timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_amount() -> u32 {
    DEFAULT_AMOUNT
}
fn default_time_limit() -> u32 {
    MAX_TIME_LIMIT_SECS
}
fn default_end_delay() -> u64 {
    4
}
fn default_request_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for QuizlineConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            amount: default_amount(),
            time_limit_secs: default_time_limit(),
            end_delay_secs: default_end_delay(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl QuizlineConfig {
    /// Check that every value is within what the game and API accept.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            (1..=MAX_AMOUNT).contains(&self.amount),
            "amount must be between 1 and {MAX_AMOUNT}, got {}",
            self.amount
        );
        anyhow::ensure!(
            (1..=MAX_TIME_LIMIT_SECS).contains(&self.time_limit_secs),
            "time limit must be between 1 and {MAX_TIME_LIMIT_SECS} seconds, got {}",
            self.time_limit_secs
        );
        anyhow::ensure!(
            self.request_timeout_secs >= 1,
            "request timeout must be at least 1 second"
        );
        anyhow::ensure!(!self.api_url.trim().is_empty(), "api_url must not be empty");
        Ok(())
    }

    /// Timing for the round driver.
    pub fn round_config(&self) -> RoundConfig {
        RoundConfig {
            end_delay: Duration::from_secs(self.end_delay_secs),
            ..RoundConfig::default()
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
    }
    result
}

/// Apply `QUIZLINE_*` overrides from `lookup` (normally the process env).
fn apply_overrides(
    config: &mut QuizlineConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(url) = lookup("QUIZLINE_API_URL") {
        config.api_url = url;
    }
    if let Some(amount) = lookup("QUIZLINE_AMOUNT") {
        config.amount = amount
            .trim()
            .parse()
            .with_context(|| format!("invalid QUIZLINE_AMOUNT: '{amount}'"))?;
    }
    Ok(())
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizline.toml` in the current directory
/// 2. `~/.config/quizline/config.toml`
///
/// Environment variable overrides: `QUIZLINE_API_URL`, `QUIZLINE_AMOUNT`.
pub fn load_config() -> Result<QuizlineConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizlineConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("quizline.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizlineConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizlineConfig::default(),
    };

    apply_overrides(&mut config, |name| std::env::var(name).ok())?;
    config.api_url = resolve_env_vars(&config.api_url);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizline"))
}

/// Create the question source described by a configuration.
pub fn create_source(config: &QuizlineConfig) -> Result<Box<dyn QuestionSource>> {
    let source = OpenTdbSource::new(&config.api_url, config.amount, config.request_timeout_secs)
        .context("failed to create trivia source")?;
    Ok(Box::new(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZLINE_TEST_HOST", "trivia.local");
        assert_eq!(resolve_env_vars("${_QUIZLINE_TEST_HOST}"), "trivia.local");
        assert_eq!(
            resolve_env_vars("http://${_QUIZLINE_TEST_HOST}/api.php"),
            "http://trivia.local/api.php"
        );
        assert_eq!(resolve_env_vars("no ${closing"), "no ${closing");
        std::env::remove_var("_QUIZLINE_TEST_HOST");
    }

    #[test]
    fn default_config() {
        let config = QuizlineConfig::default();
        assert_eq!(config.api_url, "https://opentdb.com/api.php");
        assert_eq!(config.amount, 10);
        assert_eq!(config.time_limit_secs, 600);
        assert_eq!(config.end_delay_secs, 4);
        assert!(config.validate().is_ok());
        assert_eq!(config.round_config().end_delay, Duration::from_secs(4));
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
amount = 5
time_limit_secs = 120
"#;
        let config: QuizlineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.amount, 5);
        assert_eq!(config.time_limit_secs, 120);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn validation_rejects_out_of_range_values() {
        let mut config = QuizlineConfig {
            amount: 0,
            ..QuizlineConfig::default()
        };
        assert!(config.validate().is_err());

        config.amount = 51;
        assert!(config.validate().is_err());

        config.amount = 10;
        config.time_limit_secs = 601;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("time limit"));
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = QuizlineConfig::default();
        apply_overrides(&mut config, |name| match name {
            "QUIZLINE_API_URL" => Some("http://localhost:9000/api.php".into()),
            "QUIZLINE_AMOUNT" => Some("20".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:9000/api.php");
        assert_eq!(config.amount, 20);

        let err = apply_overrides(&mut config, |name| {
            (name == "QUIZLINE_AMOUNT").then(|| "lots".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("QUIZLINE_AMOUNT"));
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizline.toml");
        std::fs::write(&path, "amount = 3\nend_delay_secs = 0\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.end_delay_secs, 0);
        assert_eq!(config.time_limit_secs, 600);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/quizline.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn create_source_from_config() {
        let source = create_source(&QuizlineConfig::default()).unwrap();
        assert_eq!(source.name(), "opentdb");
    }
}
