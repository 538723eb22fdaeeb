use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Credit store and cost policy
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    #[serde(default)]
    pub store: StoreConfig,

    /// Flat number of credits charged per conversion
    #[serde(default = "default_cost")]
    pub cost_per_conversion: i64,

    /// Credits granted once to every new account
    #[serde(default = "default_welcome")]
    pub welcome_credits: i64,

    /// Maximum number of usage entries returned by the history endpoint
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            cost_per_conversion: default_cost(),
            welcome_credits: default_welcome(),
            history_limit: default_history_limit(),
        }
    }
}

/// Where balances, purchases and usage history live
#[derive(Debug, Default, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum StoreConfig {
    /// Process-local store, lost on restart
    #[default]
    Memory,
    /// `PostgREST` data service
    Postgrest {
        url: Url,
        service_key: SecretString,
        #[serde(default = "crate::default_timeout_secs")]
        timeout_secs: u64,
    },
}

#[allow(clippy::missing_const_for_fn)]
fn default_cost() -> i64 {
    1
}

#[allow(clippy::missing_const_for_fn)]
fn default_welcome() -> i64 {
    100
}

#[allow(clippy::missing_const_for_fn)]
fn default_history_limit() -> usize {
    50
}
