//! Smart TTS - a text-to-speech CLI with multi-language detection.
//!
//! Detects the language make-up of the input text (Mandarin, Cantonese,
//! Japanese, English), segments mixed-script content, picks a matching
//! neural voice, and synthesizes the text through a remote speech service.

mod config;
mod text;
mod tts;

use anyhow::{Context, Result};
use clap::CommandFactory;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

use config::AppConfig;
use tts::{SpeechClient, Synthesizer, VoiceInfo};

/// Print the voice catalog, optionally filtered by a name prefix.
fn print_voice_table(voices: &[VoiceInfo], filter: Option<&str>) {
    let prefix = filter.map(str::to_lowercase);
    let mut shown = 0;

    for voice in voices {
        if let Some(ref prefix) = prefix
            && !voice.short_name.to_lowercase().starts_with(prefix)
        {
            continue;
        }
        println!("{:<40} {:<8} {}", voice.short_name, voice.gender, voice.personality());
        shown += 1;
    }

    if shown == 0 {
        println!("No voices matched the given filter");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let config = AppConfig::from_args();

    // Initialize logging with time-only format.
    // Respect RUST_LOG env var, fallback to verbose flag, default to info
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| if config.verbose { EnvFilter::try_new("debug") } else { EnvFilter::try_new("info") })
        .unwrap();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(LocalTime::new(time::macros::format_description!("[hour]:[minute]:[second]")))
        .init();

    // Voice catalog listing needs the service credentials but no input text
    if config.list_voices {
        if let Err(e) = config.validate() {
            error!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
        let client = SpeechClient::new(&config)?;
        let voices = client.list_voices().await.context("Failed to fetch voice catalog")?;
        print_voice_table(&voices, config.lang.as_deref());
        return Ok(());
    }

    // Resolve input: argument, file, or piped stdin; otherwise show usage
    let Some(input) = config.resolve_text()? else {
        AppConfig::command().print_help()?;
        return Ok(());
    };

    if input.trim().is_empty() {
        anyhow::bail!("No text to synthesize");
    }

    if let Err(e) = config.validate() {
        error!("❌ Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("🎤 Smart TTS v{}", env!("CARGO_PKG_VERSION"));
    if config.verbose {
        config.log_config();
    }

    let synthesizer = Synthesizer::new(&config)?;
    synthesizer.synthesize_to_file(&input, &config.output).await?;

    Ok(())
}
