use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Chat completion backend for the answer endpoint
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerConfig {
    /// Absent keys leave the endpoint answering with a configuration error
    #[serde(default)]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "crate::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: crate::default_timeout_secs(),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse("https://api.openai.com/v1/").expect("static url is valid")
}

fn default_model() -> String {
    "gpt-4.1-nano-2025-04-14".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_temperature() -> f32 {
    0.7
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_tokens() -> u32 {
    500
}
