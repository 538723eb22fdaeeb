use axum::{Json, extract::State};
use bytes::Bytes;
use http::HeaderMap;
use serde_json::{Value, json};
use vocalis_payments::WebhookOutcome;

use crate::{error::ApiError, state::SharedState};

const SIGNATURE_HEADER: &str = "stripe-signature";

/// `POST /api/stripe-webhook`
///
/// Takes the raw body so the signature is checked against the exact bytes
/// the processor signed.
pub async fn stripe_webhook(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());

    let outcome = state.reconciler.handle(&body, signature).await?;

    Ok(Json(match outcome {
        WebhookOutcome::Ignored { .. } | WebhookOutcome::AwaitingPayment { .. } => {
            json!({ "received": true })
        }
        WebhookOutcome::Credited { credits, .. } => {
            json!({ "received": true, "credited": credits })
        }
        WebhookOutcome::Duplicate { .. } => json!({ "received": true, "duplicate": true }),
    }))
}
