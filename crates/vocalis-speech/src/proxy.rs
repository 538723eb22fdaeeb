use std::time::Duration;

use vocalis_config::SpeechConfig;

use crate::{
    error::SpeechError,
    http_client::build_http_client,
    provider::{SpeechProvider, elevenlabs::ElevenLabsProvider},
    types::{Audio, SynthesisRequest},
};

/// Validates conversion input and forwards it to the speech provider
pub struct SynthesisProxy {
    provider: Box<dyn SpeechProvider>,
    default_voice: String,
    max_text_chars: usize,
}

impl SynthesisProxy {
    pub fn new(provider: Box<dyn SpeechProvider>, default_voice: String, max_text_chars: usize) -> Self {
        Self {
            provider,
            default_voice,
            max_text_chars,
        }
    }

    /// Build the proxy with an `ElevenLabs` provider from the `[speech]` section
    pub fn from_config(config: &SpeechConfig) -> crate::error::Result<Self> {
        let client = build_http_client(Duration::from_secs(config.timeout_secs))
            .map_err(|e| SpeechError::ConfigError(format!("failed to build HTTP client: {e}")))?;

        let provider = ElevenLabsProvider::new(
            client,
            config.base_url.clone(),
            config.api_key.clone(),
            config.model_id.clone(),
        );

        tracing::debug!(provider = provider.name(), "speech provider initialized");

        Ok(Self::new(
            Box::new(provider),
            config.default_voice.clone(),
            config.max_text_chars,
        ))
    }

    /// Validate text and voice before any credits are touched
    ///
    /// A missing or blank voice falls back to the configured default.
    pub fn prepare(&self, text: &str, voice: Option<&str>) -> crate::error::Result<SynthesisRequest> {
        if text.trim().is_empty() {
            return Err(SpeechError::InvalidRequest("Please enter some text.".to_string()));
        }

        if text.chars().count() > self.max_text_chars {
            return Err(SpeechError::InvalidRequest(format!(
                "Text exceeds the {}-character limit.",
                self.max_text_chars
            )));
        }

        let voice = voice
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(&self.default_voice);

        if !is_valid_voice_id(voice) {
            return Err(SpeechError::InvalidRequest("Please select a valid voice.".to_string()));
        }

        Ok(SynthesisRequest {
            text: text.to_owned(),
            voice: voice.to_owned(),
        })
    }

    pub async fn synthesize(&self, request: &SynthesisRequest) -> crate::error::Result<Audio> {
        self.provider.synthesize(request).await
    }
}

fn is_valid_voice_id(voice: &str) -> bool {
    !voice.is_empty() && voice.len() <= 64 && voice.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
