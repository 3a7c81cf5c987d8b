//! quizline-core — Game state machine, data model, and round driver.
//!
//! This crate holds everything about a trivia round that does not depend
//! on a particular question backend or terminal: the question model,
//! scoring, the idle/playing/ended state machine, and the async driver
//! that feeds it timer ticks and player input.

pub mod error;
pub mod game;
pub mod model;
pub mod session;
pub mod traits;
pub mod view;
