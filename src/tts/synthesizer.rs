//! Speech synthesis orchestration with automatic voice selection.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::{AppConfig, Gender, voice_for};
use crate::text::{Lang, classify, sanitize_for_speech, segment};

use super::client::SpeechClient;

/// Synthesizes text to an audio file, picking the voice from the detected
/// language mix of the input.
pub struct Synthesizer {
    client: SpeechClient, // Remote speech service client
    gender: Gender,       // Requested voice gender
    rate: String,         // Prosody rate, e.g. "+10%"
    pitch: String,        // Prosody pitch, e.g. "-5Hz"
    volume: String,       // Prosody volume, e.g. "+0%"
}

impl Synthesizer {
    /// Create a new synthesizer from the application configuration.
    ///
    /// # Errors
    /// Returns an error if the speech client cannot be created.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = SpeechClient::new(config)?;
        Ok(Self {
            client,
            gender: config.gender,
            rate: config.rate.clone(),
            pitch: config.pitch.clone(),
            volume: config.volume.clone(),
        })
    }

    /// Synthesize `text` and write the audio to `output`.
    ///
    /// The input is segmented and each segment classified. A single-language
    /// input uses that language's voice directly; a multi-language input
    /// collapses to the dominant language and synthesizes the whole utterance
    /// with that one voice rather than stitching per-segment audio together.
    ///
    /// # Errors
    /// Returns an error if the input is empty, the remote call fails, or the
    /// output file cannot be written.
    pub async fn synthesize_to_file(&self, text: &str, output: &Path) -> Result<()> {
        let segments = segment(text);
        if segments.is_empty() {
            anyhow::bail!("No text to synthesize");
        }

        let langs: Vec<Lang> = segments.iter().map(|seg| classify(seg.text)).collect();
        for (seg, lang) in segments.iter().zip(&langs) {
            debug!("Segment at {}: {} {:?}", seg.offset, lang, seg.text);
        }

        let distinct = distinct_non_neutral(&langs);
        let lang = match distinct.as_slice() {
            [] => Lang::Chinese,
            [only] => *only,
            _ => {
                let dominant = dominant(&langs);
                info!("Multiple languages detected ({} segments), using dominant: {}", segments.len(), dominant);
                dominant
            }
        };

        let voice = voice_for(lang, self.gender);
        let clean_text = sanitize_for_speech(text);

        let audio = self
            .client
            .synthesize(&clean_text, voice, &self.rate, &self.pitch, &self.volume)
            .await
            .context("Speech synthesis request failed")?;

        tokio::fs::write(output, &audio).await.with_context(|| format!("Failed to write {}", output.display()))?;

        info!("🔊 Generated: {} (voice: {}, {} bytes)", output.display(), voice, audio.len());
        Ok(())
    }
}

/// Distinct non-Neutral languages in first-appearance order.
fn distinct_non_neutral(langs: &[Lang]) -> Vec<Lang> {
    let mut distinct = Vec::new();
    for &lang in langs {
        if lang != Lang::Neutral && !distinct.contains(&lang) {
            distinct.push(lang);
        }
    }
    distinct
}

/// Most frequent non-Neutral language; ties go to the language seen first.
/// All-Neutral input defaults to Chinese.
fn dominant(langs: &[Lang]) -> Lang {
    let mut best = Lang::Chinese;
    let mut best_count = 0;
    for lang in distinct_non_neutral(langs) {
        let count = langs.iter().filter(|&&l| l == lang).count();
        if count > best_count {
            best = lang;
            best_count = count;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_preserves_first_appearance_order() {
        let langs = [Lang::Latin, Lang::Neutral, Lang::Chinese, Lang::Latin];
        assert_eq!(distinct_non_neutral(&langs), vec![Lang::Latin, Lang::Chinese]);
    }

    #[test]
    fn test_dominant_majority_wins() {
        let langs = [Lang::Chinese, Lang::Latin, Lang::Chinese, Lang::Neutral, Lang::Chinese];
        assert_eq!(dominant(&langs), Lang::Chinese);
    }

    #[test]
    fn test_dominant_tie_goes_to_first_seen() {
        let langs = [Lang::Japanese, Lang::Latin, Lang::Japanese, Lang::Latin];
        assert_eq!(dominant(&langs), Lang::Japanese);
    }

    #[test]
    fn test_dominant_ignores_neutral() {
        let langs = [Lang::Neutral, Lang::Neutral, Lang::Latin];
        assert_eq!(dominant(&langs), Lang::Latin);
    }

    #[test]
    fn test_all_neutral_defaults_to_chinese() {
        assert_eq!(dominant(&[Lang::Neutral, Lang::Neutral]), Lang::Chinese);
        assert_eq!(dominant(&[]), Lang::Chinese);
    }
}
