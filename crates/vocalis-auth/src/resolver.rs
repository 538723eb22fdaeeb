use std::sync::Arc;
use std::time::Duration;

use mini_moka::sync::Cache;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use url::Url;
use vocalis_config::AuthConfig;
use vocalis_core::UserIdentity;

use crate::AuthError;

/// Resolves bearer credentials to users by asking the auth service
#[derive(Clone)]
pub struct IdentityResolver {
    http: reqwest::Client,
    user_url: Url,
    public_key: SecretString,
    cache: Cache<String, Arc<UserIdentity>>,
}

impl IdentityResolver {
    /// Create a new resolver
    ///
    /// # Errors
    ///
    /// Returns an error if the user endpoint URL is invalid or the HTTP
    /// client cannot be built
    pub fn new(
        auth_url: &Url,
        public_key: SecretString,
        cache_ttl: Duration,
        cache_capacity: u64,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        let user_url = auth_url.join("/auth/v1/user")?;

        let cache = Cache::builder()
            .time_to_live(cache_ttl)
            .max_capacity(cache_capacity)
            .build();

        Ok(Self {
            http,
            user_url,
            public_key,
            cache,
        })
    }

    /// Build a resolver from the `[auth]` config section
    ///
    /// # Errors
    ///
    /// See [`IdentityResolver::new`]
    pub fn from_config(config: &AuthConfig) -> anyhow::Result<Self> {
        Self::new(
            &config.url,
            config.public_key.clone(),
            Duration::from_secs(config.cache_ttl_seconds),
            config.cache_capacity,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Resolve a bearer token to the user it was issued to
    ///
    /// Successful resolutions are cached for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the token is rejected or the service is unreachable
    pub async fn resolve(&self, token: &str) -> Result<Arc<UserIdentity>, AuthError> {
        let cache_key = sha256_hex(token);

        if let Some(cached) = self.cache.get(&cache_key) {
            return Ok(cached);
        }

        let response = self
            .http
            .get(self.user_url.clone())
            .header("apikey", self.public_key.expose_secret())
            .bearer_auth(token)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "auth service unreachable"))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AuthError::InvalidCredential);
        }

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "auth service returned an error");
            return Err(AuthError::ServiceError {
                status: status.as_u16(),
            });
        }

        let identity: UserIdentity = response.json().await?;

        if identity.id.is_empty() {
            return Err(AuthError::InvalidCredential);
        }

        tracing::debug!(user_id = %identity.id, "resolved identity");

        let identity = Arc::new(identity);
        self.cache.insert(cache_key, Arc::clone(&identity));

        Ok(identity)
    }
}

fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}
