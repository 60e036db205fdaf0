//! Configuration module for the smart TTS CLI.
//!
//! Provides CLI argument parsing and the voice selection tables.

#[allow(clippy::module_inception)]
mod config;
mod voices;

pub use config::{AppConfig, Gender};
pub use voices::voice_for;
