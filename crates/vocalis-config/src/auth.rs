use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// External auth service used to resolve bearer credentials
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Base URL of the auth service (`{url}/auth/v1/user`)
    pub url: Url,

    /// Public (anon) key sent as the `apikey` header
    pub public_key: SecretString,

    /// Cache TTL in seconds for resolved identities
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,

    /// Maximum number of cached identities
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,

    #[serde(default = "crate::default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_cache_ttl() -> u64 {
    30
}

fn default_cache_capacity() -> u64 {
    10_000
}
