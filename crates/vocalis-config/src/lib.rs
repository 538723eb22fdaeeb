#![allow(clippy::must_use_candidate)]

pub mod answer;
pub mod auth;
pub mod cors;
mod env;
pub mod health;
pub mod ledger;
mod loader;
pub mod notify;
pub mod payments;
pub mod server;
pub mod speech;
pub mod telemetry;

use serde::Deserialize;

pub use answer::*;
pub use auth::*;
pub use cors::*;
pub use health::*;
pub use ledger::*;
pub use notify::*;
pub use payments::*;
pub use server::*;
pub use speech::*;
pub use telemetry::*;

/// Top-level Vocalis configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP listener, health and CORS settings
    #[serde(default)]
    pub server: ServerConfig,
    /// External auth service used by the identity gate
    pub auth: AuthConfig,
    /// Payment processor credentials and webhook settings
    pub payments: PaymentsConfig,
    /// Speech synthesis provider
    pub speech: SpeechConfig,
    /// Credit store and cost policy
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Question answering endpoint
    #[serde(default)]
    pub answer: AnswerConfig,
    /// Outbound sign-up notifications
    #[serde(default)]
    pub notify: NotifyConfig,
    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[allow(clippy::missing_const_for_fn)]
pub(crate) fn default_timeout_secs() -> u64 {
    10
}
