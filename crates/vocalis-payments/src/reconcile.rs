use secrecy::{ExposeSecret, SecretString};
use vocalis_config::{PaymentsConfig, RecipientStrategy};
use vocalis_ledger::{DynCreditStore, NewPurchase, PurchaseOutcome};

use crate::event::{CHECKOUT_COMPLETED, CheckoutSession, WebhookEvent};
use crate::{CREDITS_PER_PURCHASE, PRICE_CENTS, PaymentError, signature};

/// What a verified webhook delivery did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Event type that carries no credit
    Ignored { event_type: String },
    /// First delivery for a checkout session
    Credited {
        user_id: String,
        session_id: String,
        credits: i64,
    },
    /// Redelivery of an already credited checkout session
    Duplicate { session_id: String },
    /// Completed session whose payment has not settled
    AwaitingPayment { session_id: String },
}

/// Turns signed checkout-completion events into exactly one credit increment
pub struct Reconciler {
    store: DynCreditStore,
    webhook_secret: SecretString,
    tolerance_secs: u64,
    strategies: Vec<RecipientStrategy>,
}

impl Reconciler {
    pub fn new(
        store: DynCreditStore,
        webhook_secret: SecretString,
        tolerance_secs: u64,
        strategies: Vec<RecipientStrategy>,
    ) -> Self {
        Self {
            store,
            webhook_secret,
            tolerance_secs,
            strategies,
        }
    }

    pub fn from_config(config: &PaymentsConfig, store: DynCreditStore) -> Self {
        Self::new(
            store,
            config.webhook_secret.clone(),
            config.signature_tolerance_secs,
            config.recipient_resolution.clone(),
        )
    }

    /// Verify, parse and apply one webhook delivery
    ///
    /// Nothing is parsed before the signature checks out, and nothing is
    /// written unless a recipient resolves.
    pub async fn handle(&self, body: &[u8], signature_header: Option<&str>) -> Result<WebhookOutcome, PaymentError> {
        signature::verify(
            body,
            signature_header,
            self.webhook_secret.expose_secret().as_bytes(),
            self.tolerance_secs,
        )
        .inspect_err(|e| tracing::warn!(reason = %e, "rejected webhook delivery"))?;

        let event: WebhookEvent =
            serde_json::from_slice(body).map_err(|e| PaymentError::InvalidPayload(e.to_string()))?;

        if event.event_type != CHECKOUT_COMPLETED {
            tracing::debug!(event_id = %event.id, event_type = %event.event_type, "ignoring webhook event");
            return Ok(WebhookOutcome::Ignored {
                event_type: event.event_type,
            });
        }

        let session: CheckoutSession = serde_json::from_value(event.data.object)
            .map_err(|e| PaymentError::InvalidPayload(format!("checkout session: {e}")))?;

        if session.awaiting_payment() {
            tracing::info!(
                session_id = %session.id,
                "checkout completed without settled payment, not crediting"
            );
            return Ok(WebhookOutcome::AwaitingPayment { session_id: session.id });
        }

        let user_id = self.resolve_recipient(&session).await?;

        let purchase = NewPurchase {
            user_id: user_id.clone(),
            credits: CREDITS_PER_PURCHASE,
            amount: PRICE_CENTS,
            stripe_session_id: session.id.clone(),
        };

        match self.store.apply_purchase(&purchase).await? {
            PurchaseOutcome::Applied { balance } => {
                tracing::info!(
                    user_id = %user_id,
                    session_id = %session.id,
                    credits = CREDITS_PER_PURCHASE,
                    balance,
                    "purchase credited"
                );

                Ok(WebhookOutcome::Credited {
                    user_id,
                    session_id: session.id,
                    credits: CREDITS_PER_PURCHASE,
                })
            }
            PurchaseOutcome::Duplicate => {
                self.log_duplicate(&session.id).await;
                Ok(WebhookOutcome::Duplicate { session_id: session.id })
            }
        }
    }

    async fn log_duplicate(&self, session_id: &str) {
        match self.store.purchase_by_session(session_id).await {
            Ok(Some(record)) => tracing::info!(
                session_id,
                credited_user = %record.user_id,
                credited_at = %record.created_at,
                "duplicate delivery, purchase already credited"
            ),
            Ok(None) => tracing::warn!(session_id, "duplicate delivery without a purchase record"),
            Err(e) => tracing::warn!(session_id, error = %e, "duplicate delivery, purchase lookup failed"),
        }
    }

    async fn resolve_recipient(&self, session: &CheckoutSession) -> Result<String, PaymentError> {
        for strategy in &self.strategies {
            let resolved = match strategy {
                RecipientStrategy::Metadata => session.metadata_value("userId").map(str::to_owned),
                RecipientStrategy::Email => self.resolve_by_email(session).await?,
            };

            match resolved {
                Some(user_id) => {
                    tracing::info!(strategy = ?strategy, session_id = %session.id, user_id = %user_id, "recipient resolved");
                    return Ok(user_id);
                }
                None => {
                    tracing::info!(strategy = ?strategy, session_id = %session.id, "recipient strategy found no user");
                }
            }
        }

        tracing::error!(session_id = %session.id, "no recipient for completed checkout");

        Err(PaymentError::UnresolvedRecipient {
            session_id: session.id.clone(),
        })
    }

    async fn resolve_by_email(&self, session: &CheckoutSession) -> Result<Option<String>, PaymentError> {
        for email in session.candidate_emails() {
            if let Some(user_id) = self.store.find_user_by_email(email).await? {
                return Ok(Some(user_id));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use vocalis_ledger::{CreditStore, MemoryStore};

    use super::*;

    const SECRET: &str = "whsec_test";

    fn reconciler(store: &Arc<MemoryStore>, strategies: Vec<RecipientStrategy>) -> Reconciler {
        Reconciler::new(store.clone(), SecretString::from(SECRET), 300, strategies)
    }

    fn completed(session: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "data": { "object": session }
        }))
        .unwrap()
    }

    fn signed(body: &[u8]) -> String {
        signature::signature_header(body, SECRET.as_bytes(), jiff::Timestamp::now().as_second())
    }

    fn default_chain() -> Vec<RecipientStrategy> {
        vec![RecipientStrategy::Metadata, RecipientStrategy::Email]
    }

    #[tokio::test]
    async fn redelivery_credits_once() {
        let store = Arc::new(MemoryStore::new());
        let reconciler = reconciler(&store, default_chain());
        let body = completed(json!({ "id": "cs_123", "metadata": { "userId": "u1" } }));

        let first = reconciler.handle(&body, Some(&signed(&body))).await.unwrap();
        let second = reconciler.handle(&body, Some(&signed(&body))).await.unwrap();

        assert!(matches!(first, WebhookOutcome::Credited { credits: 500, .. }));
        assert_eq!(
            second,
            WebhookOutcome::Duplicate {
                session_id: "cs_123".to_string()
            }
        );
        assert_eq!(store.balance("u1").await.unwrap(), 500);
        assert_eq!(store.purchase_count(), 1);
    }

    #[tokio::test]
    async fn unpaid_session_is_not_credited() {
        let store = Arc::new(MemoryStore::new());
        let body = completed(json!({
            "id": "cs_12",
            "metadata": { "userId": "u1" },
            "payment_status": "unpaid"
        }));

        let outcome = reconciler(&store, default_chain())
            .handle(&body, Some(&signed(&body)))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            WebhookOutcome::AwaitingPayment {
                session_id: "cs_12".to_string()
            }
        );
        assert_eq!(store.balance("u1").await.unwrap(), 0);
        assert_eq!(store.purchase_count(), 0);
    }

    #[tokio::test]
    async fn paid_session_is_credited() {
        let store = Arc::new(MemoryStore::new());
        let body = completed(json!({
            "id": "cs_13",
            "metadata": { "userId": "u1" },
            "payment_status": "paid"
        }));

        reconciler(&store, default_chain())
            .handle(&body, Some(&signed(&body)))
            .await
            .unwrap();

        assert_eq!(store.balance("u1").await.unwrap(), 500);
    }

    #[tokio::test]
    async fn bad_signature_mutates_nothing() {
        let store = Arc::new(MemoryStore::new());
        let reconciler = reconciler(&store, default_chain());
        let body = completed(json!({ "id": "cs_1", "metadata": { "userId": "u1" } }));
        let forged = signature::signature_header(&body, b"whsec_forged", jiff::Timestamp::now().as_second());

        assert!(matches!(
            reconciler.handle(&body, Some(&forged)).await,
            Err(PaymentError::Signature(_))
        ));
        assert!(matches!(
            reconciler.handle(&body, None).await,
            Err(PaymentError::Signature(signature::SignatureError::MissingHeader))
        ));
        assert_eq!(store.balance("u1").await.unwrap(), 0);
        assert_eq!(store.purchase_count(), 0);
    }

    #[tokio::test]
    async fn other_events_are_acknowledged() {
        let store = Arc::new(MemoryStore::new());
        let body = serde_json::to_vec(&json!({
            "id": "evt_2",
            "type": "payment_intent.created",
            "data": { "object": {} }
        }))
        .unwrap();

        let outcome = reconciler(&store, default_chain())
            .handle(&body, Some(&signed(&body)))
            .await
            .unwrap();

        assert!(matches!(outcome, WebhookOutcome::Ignored { .. }));
    }

    #[tokio::test]
    async fn falls_back_to_email_lookup() {
        let store = Arc::new(MemoryStore::new());
        store.register_user("u7", "grace@example.com");
        let body = completed(json!({
            "id": "cs_9",
            "metadata": {},
            "customer_details": { "email": "Grace@example.com" }
        }));

        reconciler(&store, default_chain())
            .handle(&body, Some(&signed(&body)))
            .await
            .unwrap();

        assert_eq!(store.balance("u7").await.unwrap(), 500);
    }

    #[tokio::test]
    async fn chain_order_is_respected() {
        let store = Arc::new(MemoryStore::new());
        store.register_user("by-email", "ada@example.com");
        let body = completed(json!({
            "id": "cs_10",
            "metadata": { "userId": "by-metadata" },
            "customer_email": "ada@example.com"
        }));

        reconciler(&store, vec![RecipientStrategy::Email, RecipientStrategy::Metadata])
            .handle(&body, Some(&signed(&body)))
            .await
            .unwrap();

        assert_eq!(store.balance("by-email").await.unwrap(), 500);
        assert_eq!(store.balance("by-metadata").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unresolved_recipient_mutates_nothing() {
        let store = Arc::new(MemoryStore::new());
        let body = completed(json!({ "id": "cs_11", "customer_email": "stranger@example.com" }));

        let err = reconciler(&store, default_chain())
            .handle(&body, Some(&signed(&body)))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::UnresolvedRecipient { .. }));
        assert_eq!(store.purchase_count(), 0);
    }
}
