//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use secrecy::SecretString;
use url::Url;
use vocalis_config::{
    AnswerConfig, AuthConfig, Config, CorsConfig, LedgerConfig, NotifyConfig, PaymentsConfig, RecipientStrategy,
    ServerConfig, SpeechConfig, TelemetryConfig,
};

use super::WEBHOOK_SECRET;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder whose upstreams all point at `upstream` (a mock server base URL)
    pub fn new(upstream: &str) -> Self {
        let base = Url::parse(upstream).expect("valid upstream URL");
        let v1 = base.join("/v1/").expect("valid URL");

        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    public_origin: Url::parse("https://app.example.com").expect("valid URL"),
                    ..ServerConfig::default()
                },
                auth: AuthConfig {
                    url: base.clone(),
                    public_key: SecretString::from("anon-test-key"),
                    cache_ttl_seconds: 30,
                    cache_capacity: 100,
                    timeout_secs: 5,
                },
                payments: PaymentsConfig {
                    secret_key: SecretString::from("sk_test_integration"),
                    webhook_secret: SecretString::from(WEBHOOK_SECRET),
                    base_url: v1.clone(),
                    signature_tolerance_secs: 300,
                    recipient_resolution: vec![RecipientStrategy::Metadata, RecipientStrategy::Email],
                    timeout_secs: 5,
                },
                speech: SpeechConfig {
                    api_key: SecretString::from("xi-test-key"),
                    default_voice: "rachel".to_owned(),
                    model_id: "eleven_multilingual_v2".to_owned(),
                    base_url: v1.clone(),
                    max_text_chars: 1000,
                    timeout_secs: 5,
                },
                ledger: LedgerConfig::default(),
                answer: AnswerConfig {
                    base_url: v1,
                    ..AnswerConfig::default()
                },
                notify: NotifyConfig::default(),
                telemetry: TelemetryConfig::default(),
            },
        }
    }

    /// Set the flat per-conversion cost
    pub fn with_cost(mut self, cost: i64) -> Self {
        self.config.ledger.cost_per_conversion = cost;
        self
    }

    /// Set the ordered recipient resolution chain
    pub fn with_recipient_chain(mut self, chain: Vec<RecipientStrategy>) -> Self {
        self.config.payments.recipient_resolution = chain;
        self
    }

    /// Configure an answer API key
    pub fn with_answer_key(mut self, key: &str) -> Self {
        self.config.answer.api_key = Some(SecretString::from(key.to_owned()));
        self
    }

    /// Send sign-up notifications to `url`
    pub fn with_notify_url(mut self, url: &str) -> Self {
        self.config.notify.webhook_url = Some(Url::parse(url).expect("valid URL"));
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
