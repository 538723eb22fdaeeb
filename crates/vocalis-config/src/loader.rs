use std::path::Path;

use secrecy::{ExposeSecret, SecretString};

use crate::{Config, StoreConfig};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns a server misconfiguration error if a required secret is
    /// empty or a numeric policy is out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_secrets()?;
        self.validate_ledger()?;
        self.validate_speech()?;
        Ok(())
    }

    fn validate_secrets(&self) -> anyhow::Result<()> {
        require_secret("auth.public_key", &self.auth.public_key)?;
        require_secret("payments.secret_key", &self.payments.secret_key)?;
        require_secret("payments.webhook_secret", &self.payments.webhook_secret)?;
        require_secret("speech.api_key", &self.speech.api_key)?;

        if let StoreConfig::Postgrest { ref service_key, .. } = self.ledger.store {
            require_secret("ledger.store.service_key", service_key)?;
        }

        Ok(())
    }

    fn validate_ledger(&self) -> anyhow::Result<()> {
        if self.ledger.cost_per_conversion <= 0 {
            anyhow::bail!("server misconfiguration: ledger.cost_per_conversion must be greater than 0");
        }

        if self.ledger.welcome_credits < 0 {
            anyhow::bail!("server misconfiguration: ledger.welcome_credits must not be negative");
        }

        if self.payments.recipient_resolution.is_empty() {
            anyhow::bail!("server misconfiguration: payments.recipient_resolution must name at least one strategy");
        }

        if self.auth.cache_capacity > 1_000_000 {
            anyhow::bail!("server misconfiguration: auth.cache_capacity exceeds maximum of 1,000,000");
        }

        Ok(())
    }

    fn validate_speech(&self) -> anyhow::Result<()> {
        if self.speech.max_text_chars == 0 {
            anyhow::bail!("server misconfiguration: speech.max_text_chars must be greater than 0");
        }

        if self.speech.default_voice.trim().is_empty() {
            anyhow::bail!("server misconfiguration: speech.default_voice must not be empty");
        }

        Ok(())
    }
}

fn require_secret(name: &str, secret: &SecretString) -> anyhow::Result<()> {
    if secret.expose_secret().trim().is_empty() {
        anyhow::bail!("server misconfiguration: {name} must not be empty");
    }
    Ok(())
}
