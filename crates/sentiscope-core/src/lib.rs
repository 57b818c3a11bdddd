//! Core library for sentiscope.
//!
//! This crate provides the rule-based sentiment scoring engine used by the
//! `sentiscope` CLI and HTTP service, plus configuration loading shared by
//! both.
//!
//! # Modules
//!
//! - [`engine`] - The combined analysis entry point and report type
//! - [`sentiment`] - Lexicon-based sentiment scoring
//! - [`language`] - Heuristic language identification
//! - [`lexicon`] - Static word lists and language markers
//! - [`text`] - Tokenization helpers
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use sentiscope_core::engine;
//!
//! let report = engine::analyze("This was a great and wonderful day");
//! assert_eq!(report.sentiment.as_str(), "positive");
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;
pub mod language;
pub mod lexicon;
pub mod sentiment;
pub mod text;

pub use config::{Config, ConfigLoader, LogLevel};
pub use engine::{SentimentReport, analyze};
pub use error::{ConfigError, ConfigResult};
pub use language::Language;
pub use sentiment::Sentiment;
