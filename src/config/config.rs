//! Application configuration and CLI argument parsing.

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Voice gender preference for synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Female voice (default)
    #[default]
    Female,
    /// Male voice
    Male,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Female => write!(f, "female"),
            Gender::Male => write!(f, "male"),
        }
    }
}

/// Smart TTS application configuration.
#[derive(Parser, Debug, Clone)]
#[command(name = "smart-tts")]
#[command(author, version, about = "Smart TTS with multi-language detection", long_about = None)]
pub struct AppConfig {
    /// Text to synthesize (reads stdin when omitted and piped)
    pub text: Option<String>,

    /// Output audio file path
    #[arg(long, short = 'o', default_value = "output.mp3")]
    pub output: PathBuf,

    /// Voice gender
    #[arg(long, short = 'g', value_enum, default_value = "female")]
    pub gender: Gender,

    /// Speech rate (e.g., +10%, -20%)
    #[arg(long, short = 'r', default_value = "+0%")]
    pub rate: String,

    /// Voice pitch (e.g., +5Hz, -10Hz)
    #[arg(long, short = 'p', default_value = "+0Hz")]
    pub pitch: String,

    /// Volume (e.g., +10%, -20%)
    #[arg(long, default_value = "+0%")]
    pub volume: String,

    /// List available voices and exit
    #[arg(long)]
    pub list_voices: bool,

    /// Filter listed voices by name prefix (e.g., zh, ja-JP)
    #[arg(long)]
    pub lang: Option<String>,

    /// Read text from file
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Speech service region
    #[arg(long, env = "SPEECH_REGION", default_value = "eastasia")]
    pub region: String,

    /// Speech service subscription key
    #[arg(long, env = "SPEECH_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl AppConfig {
    /// Parse configuration from command line arguments.
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Resolve the input text: positional argument first, then `--file`,
    /// then piped stdin. `None` means nothing was provided and the caller
    /// should print usage.
    pub fn resolve_text(&self) -> Result<Option<String>> {
        if let Some(ref text) = self.text {
            return Ok(Some(text.clone()));
        }

        if let Some(ref path) = self.file {
            let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read text from {}", path.display()))?;
            return Ok(Some(text));
        }

        let mut stdin = std::io::stdin();
        if !stdin.is_terminal() {
            let mut text = String::new();
            stdin.read_to_string(&mut text).context("Failed to read text from stdin")?;
            return Ok(Some(text));
        }

        Ok(None)
    }

    /// Get the subscription key, failing with guidance when it is missing.
    pub fn require_key(&self) -> Result<&str> {
        match self.key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => anyhow::bail!("Speech service key is required. Set SPEECH_KEY or pass --key."),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.require_key()?;

        if self.region.trim().is_empty() {
            anyhow::bail!("Speech service region must not be empty");
        }

        if self.timeout_secs == 0 {
            anyhow::bail!("Request timeout must be at least 1 second");
        }

        Ok(())
    }

    /// Log the current configuration.
    pub fn log_config(&self) {
        info!("Configuration:");
        info!("  Region: {}", self.region);
        info!("  Output: {}", self.output.display());
        info!("  Gender: {}", self.gender);
        info!("  Rate: {}, pitch: {}, volume: {}", self.rate, self.pitch, self.volume);
    }
}
