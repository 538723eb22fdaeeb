use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{
    error::SpeechError,
    types::{Audio, SynthesisRequest},
};

use super::SpeechProvider;

/// `ElevenLabs` text-to-speech provider
pub struct ElevenLabsProvider {
    client: Client,
    base_url: Url,
    api_key: SecretString,
    model_id: String,
}

impl ElevenLabsProvider {
    pub fn new(client: Client, base_url: Url, api_key: SecretString, model_id: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
            model_id,
        }
    }

    fn endpoint(&self, voice: &str) -> crate::error::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SpeechError::ConfigError("speech base_url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["text-to-speech", voice]);
        Ok(url)
    }
}

#[derive(serde::Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

#[async_trait]
impl SpeechProvider for ElevenLabsProvider {
    async fn synthesize(&self, request: &SynthesisRequest) -> crate::error::Result<Audio> {
        let url = self.endpoint(&request.voice)?;

        tracing::debug!(
            voice = %request.voice,
            model = %self.model_id,
            chars = request.text.chars().count(),
            "ElevenLabs synthesis request"
        );

        let body = ElevenLabsRequest {
            text: &request.text,
            model_id: &self.model_id,
        };

        let response = self
            .client
            .post(url)
            .header("xi-api-key", self.api_key.expose_secret())
            .header(http::header::ACCEPT, Audio::CONTENT_TYPE)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!(error = %e, "ElevenLabs request failed");
                SpeechError::ConnectionError(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            tracing::error!(status = status.as_u16(), body = %error_text, "ElevenLabs API error");

            return Err(SpeechError::ProviderApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "failed to read ElevenLabs response body");
            SpeechError::ConnectionError(e.to_string())
        })?;

        if audio.is_empty() {
            tracing::error!("ElevenLabs returned an empty audio body");
            return Err(SpeechError::EmptyAudio);
        }

        tracing::debug!(bytes = audio.len(), "ElevenLabs synthesis complete");

        Ok(Audio { bytes: audio })
    }

    fn name(&self) -> &str {
        "elevenlabs"
    }
}
