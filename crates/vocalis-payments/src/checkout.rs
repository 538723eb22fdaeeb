use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;
use vocalis_config::PaymentsConfig;
use vocalis_core::UserIdentity;

use crate::{PRICE_CENTS, PRODUCT_NAME, PaymentError};

/// Creates hosted checkout sessions at the payment processor
#[derive(Clone)]
pub struct CheckoutClient {
    http: reqwest::Client,
    sessions_url: Url,
    secret_key: SecretString,
    success_url: Url,
    cancel_url: Url,
}

#[derive(Deserialize)]
struct SessionResponse {
    id: String,
}

impl CheckoutClient {
    /// Create a new checkout client
    ///
    /// # Errors
    ///
    /// Returns an error if a URL cannot be derived or the HTTP client cannot be built
    pub fn new(config: &PaymentsConfig, public_origin: &Url) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            sessions_url: config.base_url.join("checkout/sessions")?,
            secret_key: config.secret_key.clone(),
            success_url: public_origin.join("/voice-changer?success=true")?,
            cancel_url: public_origin.join("/voice-changer?canceled=true")?,
        })
    }

    /// Create a fixed-price credit pack session for `user`
    ///
    /// Returns the processor's session id.
    pub async fn create_session(&self, user: &UserIdentity) -> Result<String, PaymentError> {
        let params = self.session_params(user);

        let response = self
            .http
            .post(self.sessions_url.clone())
            .bearer_auth(self.secret_key.expose_secret())
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %user.id, "checkout request failed");
                PaymentError::Request(e)
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status, user_id = %user.id, "payment processor rejected checkout session");
            return Err(PaymentError::Provider { status, message });
        }

        let session: SessionResponse = response.json().await?;

        tracing::info!(user_id = %user.id, session_id = %session.id, "checkout session created");

        Ok(session.id)
    }

    fn session_params(&self, user: &UserIdentity) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("mode", "payment".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            ("line_items[0][price_data][currency]", "usd".to_string()),
            ("line_items[0][price_data][unit_amount]", PRICE_CENTS.to_string()),
            ("line_items[0][price_data][product_data][name]", PRODUCT_NAME.to_string()),
            ("success_url", self.success_url.to_string()),
            ("cancel_url", self.cancel_url.to_string()),
            ("metadata[userId]", user.id.clone()),
        ];

        if let Some(email) = &user.email {
            params.push(("customer_email", email.clone()));
            params.push(("metadata[userEmail]", email.clone()));
        }

        params
    }
}
