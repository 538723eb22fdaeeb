use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Speech synthesis provider configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeechConfig {
    /// Provider API key
    pub api_key: SecretString,
    /// Voice used when a request does not name one
    pub default_voice: String,
    #[serde(default = "default_model")]
    pub model_id: String,
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Longest accepted input, in characters
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
    #[serde(default = "crate::default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_base_url() -> Url {
    Url::parse("https://api.elevenlabs.io/v1/").expect("static url is valid")
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_text_chars() -> usize {
    1000
}
