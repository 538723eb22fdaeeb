use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;
use vocalis_config::AnswerConfig;

use crate::AnswerError;
use crate::protocol::{ChatMessage, ChatRequest, ChatResponse};

const SYSTEM_PROMPT: &str = "You are a helpful question answering AI assistant that provides concise, accurate, \
                             and engaging answers to questions.";

/// Answers free-form questions with a single chat completion
pub struct AnswerGenerator {
    client: Client,
    completions_url: String,
    api_key: Option<SecretString>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnswerGenerator {
    /// Build the generator from the `[answer]` section
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn from_config(config: &AnswerConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.expose_secret().trim().is_empty());

        if api_key.is_none() {
            tracing::warn!("no answer API key configured; /api/generate-answer will fail");
        }

        Ok(Self {
            client,
            completions_url: completions_url(&config.base_url),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Ask the backend for an answer
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` without an API key, `Upstream` for any
    /// transport, status or parse failure
    pub async fn answer(&self, question: &str) -> Result<String, AnswerError> {
        let api_key = self.api_key.as_ref().ok_or(AnswerError::NotConfigured)?;

        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: question,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.completions_url)
            .bearer_auth(api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "answer request failed");
                AnswerError::Upstream(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(status = %status, "answer backend returned error");
            return Err(AnswerError::Upstream(format!("provider returned {status}")));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnswerError::Upstream(format!("failed to parse response: {e}")))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AnswerError::Upstream("response had no answer".to_string()))
    }
}

/// Pull a non-empty `question` string out of a request body
///
/// # Errors
///
/// Returns `MissingQuestion` for a missing, empty, or non-string field
pub fn question_from(body: &serde_json::Value) -> Result<&str, AnswerError> {
    body.get("question")
        .and_then(serde_json::Value::as_str)
        .filter(|q| !q.trim().is_empty())
        .ok_or(AnswerError::MissingQuestion)
}

fn completions_url(base_url: &Url) -> String {
    let base = base_url.as_str().trim_end_matches('/');
    format!("{base}/chat/completions")
}
