//! quizline-source — Trivia question sources.
//!
//! Implements the `QuestionSource` trait for the Open Trivia DB HTTP API
//! and for fixed in-memory question lists, and loads the `quizline.toml`
//! configuration that picks between them.

pub mod config;
pub mod opentdb;
pub mod static_source;

pub use config::{create_source, load_config, load_config_from, QuizlineConfig};
pub use opentdb::OpenTdbSource;
pub use quizline_core::error::LoadError;
pub use static_source::StaticSource;
