use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use crate::types::{GrantOutcome, NewPurchase, NewUsageEntry, PurchaseOutcome, PurchaseRecord, UsageEntry};
use crate::{CreditStore, LedgerError};

/// Credit store backed by a `PostgREST` data service
///
/// Balance mutations go through the SQL functions in `sql/ledger.sql`,
/// each of which runs as a single statement.
#[derive(Clone)]
pub struct PostgrestStore {
    http: reqwest::Client,
    base_url: Url,
    service_key: SecretString,
}

#[derive(Deserialize)]
struct BalanceRow {
    balance: i64,
}

#[derive(Deserialize)]
struct UserRow {
    id: String,
}

#[derive(Deserialize)]
struct AppliedRow {
    applied: bool,
    balance: i64,
}

impl PostgrestStore {
    /// Create a new store client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(base_url: Url, service_key: SecretString, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        // Relative joins need a trailing slash to keep the `/rest/v1` prefix
        let base_url = if base_url.path().ends_with('/') {
            base_url
        } else {
            let mut url = base_url;
            url.set_path(&format!("{}/", url.path()));
            url
        };

        Ok(Self {
            http,
            base_url,
            service_key,
        })
    }

    fn url(&self, path: &str) -> Result<Url, LedgerError> {
        self.base_url
            .join(path)
            .map_err(|e| LedgerError::InvalidResponse(format!("invalid URL: {e}")))
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", self.service_key.expose_secret())
            .bearer_auth(self.service_key.expose_secret())
    }

    async fn rpc<T: DeserializeOwned>(&self, function: &str, args: serde_json::Value) -> Result<T, LedgerError> {
        let request = self.authorized(self.http.post(self.url(&format!("rpc/{function}"))?)).json(&args);
        send(request).await
    }

    async fn select<T: DeserializeOwned>(&self, table: &str, query: &[(&str, String)]) -> Result<Vec<T>, LedgerError> {
        let request = self.authorized(self.http.get(self.url(table)?)).query(query);
        send(request).await
    }
}

async fn send<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, LedgerError> {
    let response = request.send().await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        tracing::error!(status, message = %message, "data service request failed");
        return Err(LedgerError::Api { status, message });
    }

    response
        .json()
        .await
        .map_err(|e| LedgerError::InvalidResponse(e.to_string()))
}

#[async_trait::async_trait]
impl CreditStore for PostgrestStore {
    async fn balance(&self, user_id: &str) -> Result<i64, LedgerError> {
        let rows: Vec<BalanceRow> = self
            .select(
                "credits",
                &[("select", "balance".to_string()), ("user_id", format!("eq.{user_id}"))],
            )
            .await?;

        Ok(rows.first().map_or(0, |row| row.balance))
    }

    async fn try_debit(&self, user_id: &str, amount: i64) -> Result<i64, LedgerError> {
        let balance: Option<i64> = self
            .rpc("debit_credits", json!({ "p_user_id": user_id, "p_amount": amount }))
            .await?;

        balance.ok_or(LedgerError::InsufficientCredits { required: amount })
    }

    async fn refund(&self, user_id: &str, amount: i64) -> Result<i64, LedgerError> {
        self.rpc("add_credits", json!({ "p_user_id": user_id, "p_amount": amount }))
            .await
    }

    async fn apply_purchase(&self, purchase: &NewPurchase) -> Result<PurchaseOutcome, LedgerError> {
        let row: AppliedRow = self
            .rpc(
                "apply_purchase",
                json!({
                    "p_user_id": purchase.user_id,
                    "p_session_id": purchase.stripe_session_id,
                    "p_credits": purchase.credits,
                    "p_amount": purchase.amount,
                }),
            )
            .await?;

        Ok(if row.applied {
            PurchaseOutcome::Applied { balance: row.balance }
        } else {
            PurchaseOutcome::Duplicate
        })
    }

    async fn purchase_by_session(&self, session_id: &str) -> Result<Option<PurchaseRecord>, LedgerError> {
        let rows: Vec<PurchaseRecord> = self
            .select(
                "purchases",
                &[
                    ("select", "*".to_string()),
                    ("stripe_session_id", format!("eq.{session_id}")),
                ],
            )
            .await?;

        Ok(rows.into_iter().next())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<String>, LedgerError> {
        let rows: Vec<UserRow> = self
            .rpc("find_user_by_email", json!({ "p_email": email }))
            .await?;

        Ok(rows.into_iter().next().map(|row| row.id))
    }

    async fn append_usage(&self, entry: &NewUsageEntry) -> Result<UsageEntry, LedgerError> {
        let request = self
            .authorized(self.http.post(self.url("usage_history")?))
            .header("Prefer", "return=representation")
            .json(entry);

        let rows: Vec<UsageEntry> = send(request).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| LedgerError::InvalidResponse("insert returned no rows".to_string()))
    }

    async fn history(&self, user_id: &str, limit: usize) -> Result<Vec<UsageEntry>, LedgerError> {
        self.select(
            "usage_history",
            &[
                ("select", "user_id,text,voice_id,chars_used,created_at".to_string()),
                ("user_id", format!("eq.{user_id}")),
                ("order", "created_at.desc".to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn grant_welcome(&self, user_id: &str, amount: i64) -> Result<GrantOutcome, LedgerError> {
        let row: AppliedRow = self
            .rpc("grant_welcome", json!({ "p_user_id": user_id, "p_amount": amount }))
            .await?;

        Ok(if row.applied {
            GrantOutcome::Granted { balance: row.balance }
        } else {
            GrantOutcome::AlreadyGranted { balance: row.balance }
        })
    }
}
