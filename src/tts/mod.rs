//! Text-to-speech module.
//!
//! Provides the remote speech service client and the synthesis orchestration
//! that picks voices from detected languages.

mod client;
mod synthesizer;

pub use client::{SpeechClient, SpeechError, VoiceInfo};
pub use synthesizer::Synthesizer;
