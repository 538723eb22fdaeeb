use std::time::Duration;

use serde::Deserialize;

/// CORS configuration for the browser client
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins; a `"*"` entry allows any origin
    #[serde(default = "default_origins")]
    pub origins: Vec<String>,
    /// Max age for preflight cache in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
}

impl CorsConfig {
    /// Whether any origin is allowed
    pub fn allows_any_origin(&self) -> bool {
        self.origins.iter().any(|o| o == "*")
    }

    /// Get max age as Duration
    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }
}

fn default_origins() -> Vec<String> {
    vec!["*".to_string()]
}
