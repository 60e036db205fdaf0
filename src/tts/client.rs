//! HTTP client for the remote speech synthesis service.
//!
//! Talks to the cognitive speech REST endpoints of a region:
//! POST `/cognitiveservices/v1` with an SSML body returns the audio bytes,
//! GET `/cognitiveservices/voices/list` returns the voice catalog as JSON.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::AppConfig;

/// Audio container requested from the service.
const OUTPUT_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";

/// Errors from the speech service seam.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech service request failed: {0}")]
    Network(String),

    #[error("speech service request timed out")]
    Timeout,

    #[error("speech service returned HTTP {status}: {body}")]
    Service { status: StatusCode, body: String },

    #[error("unexpected response from speech service: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for SpeechError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SpeechError::Timeout
        } else if e.is_connect() {
            SpeechError::Network(format!("Cannot connect to speech service: {}", e))
        } else {
            SpeechError::Network(e.to_string())
        }
    }
}

/// One entry of the service's voice catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoiceInfo {
    pub short_name: String,
    pub gender: String,
    #[serde(default)]
    pub voice_tag: Option<VoiceTag>,
}

/// Optional descriptive tags attached to a catalog voice.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoiceTag {
    #[serde(default)]
    pub voice_personalities: Vec<String>,
}

impl VoiceInfo {
    /// First personality tag, if the catalog provides one.
    pub fn personality(&self) -> &str {
        self.voice_tag.as_ref().and_then(|tag| tag.voice_personalities.first()).map(String::as_str).unwrap_or("")
    }
}

/// Client for the speech synthesis REST service.
pub struct SpeechClient {
    client: reqwest::Client,
    region: String,
    key: String,
}

impl SpeechClient {
    /// Create a client from the application configuration.
    ///
    /// # Errors
    /// Returns an error if the key is missing or the HTTP client cannot be
    /// built.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let key = config.require_key()?.to_string();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("smart-tts/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, region: config.region.clone(), key })
    }

    fn synthesize_url(&self) -> String {
        format!("https://{}.tts.speech.microsoft.com/cognitiveservices/v1", self.region)
    }

    fn voices_url(&self) -> String {
        format!("https://{}.tts.speech.microsoft.com/cognitiveservices/voices/list", self.region)
    }

    /// Synthesize `text` with the given voice and prosody, returning the
    /// encoded audio bytes.
    ///
    /// # Errors
    /// Returns a [`SpeechError`] on network failure or a non-success status.
    pub async fn synthesize(&self, text: &str, voice: &str, rate: &str, pitch: &str, volume: &str) -> Result<Vec<u8>, SpeechError> {
        let ssml = build_ssml(text, voice, rate, pitch, volume);
        debug!("Requesting synthesis for {} chars with voice {}", text.chars().count(), voice);

        let response = self
            .client
            .post(self.synthesize_url())
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .body(ssml)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Service { status, body });
        }

        let audio = response.bytes().await?;
        debug!("Received {} bytes of audio", audio.len());
        Ok(audio.to_vec())
    }

    /// Fetch the voice catalog.
    ///
    /// # Errors
    /// Returns a [`SpeechError`] on network failure, a non-success status, or
    /// a catalog body that fails to parse.
    pub async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError> {
        let response = self.client.get(self.voices_url()).header("Ocp-Apim-Subscription-Key", &self.key).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Service { status, body });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SpeechError::InvalidResponse(format!("Invalid voice catalog JSON: {}", e)))
    }
}

/// Build the SSML request body for one utterance.
fn build_ssml(text: &str, voice: &str, rate: &str, pitch: &str, volume: &str) -> String {
    // The voice name decides the synthesis language; xml:lang only matters
    // for fallback, so the neutral en-US tag is fine for all voices.
    format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' xml:lang='en-US'>\
         <voice name='{}'><prosody rate='{}' pitch='{}' volume='{}'>{}</prosody></voice>\
         </speak>",
        escape_xml(voice),
        escape_xml(rate),
        escape_xml(pitch),
        escape_xml(volume),
        escape_xml(text),
    )
}

/// Escape XML metacharacters for safe embedding in the SSML body.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & c > 'd'"), "a &lt; b &amp; c &gt; &apos;d&apos;");
        assert_eq!(escape_xml("plain 你好"), "plain 你好");
    }

    #[test]
    fn test_build_ssml_embeds_voice_and_prosody() {
        let ssml = build_ssml("你好", "zh-TW-HsiaoChenNeural", "+10%", "-5Hz", "+0%");
        assert!(ssml.contains("<voice name='zh-TW-HsiaoChenNeural'>"));
        assert!(ssml.contains("rate='+10%'"));
        assert!(ssml.contains("pitch='-5Hz'"));
        assert!(ssml.contains("volume='+0%'"));
        assert!(ssml.contains(">你好<"));
    }

    #[test]
    fn test_build_ssml_escapes_text() {
        let ssml = build_ssml("5 < 6 & 7", "en-US-JennyNeural", "+0%", "+0Hz", "+0%");
        assert!(ssml.contains("5 &lt; 6 &amp; 7"));
    }

    #[test]
    fn test_voice_catalog_parsing() {
        let body = r#"[
            {"Name": "Microsoft Server Speech (zh-HK, HiuGaaiNeural)",
             "ShortName": "zh-HK-HiuGaaiNeural", "Gender": "Female", "Locale": "zh-HK",
             "VoiceTag": {"VoicePersonalities": ["Friendly", "Positive"]}},
            {"ShortName": "ja-JP-KeitaNeural", "Gender": "Male", "Locale": "ja-JP"}
        ]"#;
        let voices: Vec<VoiceInfo> = serde_json::from_str(body).unwrap();
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[0].short_name, "zh-HK-HiuGaaiNeural");
        assert_eq!(voices[0].personality(), "Friendly");
        assert_eq!(voices[1].personality(), "");
        assert_eq!(voices[1].gender, "Male");
    }
}
