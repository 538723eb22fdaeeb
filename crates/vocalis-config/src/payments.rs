use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Payment processor configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentsConfig {
    /// Processor API secret key
    pub secret_key: SecretString,

    /// Webhook signing secret
    pub webhook_secret: SecretString,

    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// Maximum age of a signed webhook timestamp
    #[serde(default = "default_tolerance")]
    pub signature_tolerance_secs: u64,

    /// Ordered strategies used to find the user a completed checkout belongs to
    #[serde(default = "default_resolution")]
    pub recipient_resolution: Vec<RecipientStrategy>,

    #[serde(default = "crate::default_timeout_secs")]
    pub timeout_secs: u64,
}

/// A single step in the recipient fallback chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientStrategy {
    /// `metadata.userId` on the checkout session
    Metadata,
    /// Look up the user by the checkout's email addresses
    Email,
}

fn default_base_url() -> Url {
    Url::parse("https://api.stripe.com/v1/").expect("static url is valid")
}

#[allow(clippy::missing_const_for_fn)]
fn default_tolerance() -> u64 {
    300
}

fn default_resolution() -> Vec<RecipientStrategy> {
    vec![RecipientStrategy::Metadata, RecipientStrategy::Email]
}
