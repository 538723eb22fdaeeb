use std::sync::Arc;

use axum::{Extension, extract::State};
use serde::Deserialize;
use vocalis_core::UserIdentity;
use vocalis_ledger::NewUsageEntry;
use vocalis_speech::{Audio, SynthesisRequest};

use crate::{error::ApiError, extract::JsonBody, state::SharedState};

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    #[serde(default)]
    text: String,
    #[serde(default)]
    voice: Option<String>,
}

/// `POST /api/elevenlabs`
///
/// Validate, then debit and synthesize on a detached task. A failed
/// synthesis is refunded; a failed history append is only logged since the
/// user already paid for the audio.
pub async fn convert(
    State(state): State<SharedState>,
    Extension(user): Extension<Arc<UserIdentity>>,
    JsonBody(body): JsonBody<ConvertRequest>,
) -> Result<Audio, ApiError> {
    let request = state.speech.prepare(&body.text, body.voice.as_deref())?;

    // Once debited, the refund or history append must run even if the client disconnects
    let task = tokio::spawn(debit_and_synthesize(state, user, request));

    task.await.map_err(|e| {
        tracing::error!(error = %e, "conversion task did not complete");
        ApiError::internal()
    })?
}

async fn debit_and_synthesize(
    state: SharedState,
    user: Arc<UserIdentity>,
    request: SynthesisRequest,
) -> Result<Audio, ApiError> {
    let cost = state.cost.per_conversion();

    let balance = state.store.try_debit(&user.id, cost).await?;
    tracing::debug!(user_id = %user.id, cost, balance, "conversion debited");

    let audio = match state.speech.synthesize(&request).await {
        Ok(audio) => audio,
        Err(e) => {
            refund(&state, &user.id, cost).await;
            return Err(e.into());
        }
    };

    let entry = NewUsageEntry::new(user.id.as_str(), request.text, request.voice);

    if let Err(e) = state.store.append_usage(&entry).await {
        tracing::error!(user_id = %user.id, error = %e, "failed to record usage history");
    }

    tracing::info!(
        user_id = %user.id,
        voice = %entry.voice_id,
        chars = entry.chars_used,
        bytes = audio.len(),
        "conversion complete"
    );

    Ok(audio)
}

async fn refund(state: &SharedState, user_id: &str, amount: i64) {
    match state.store.refund(user_id, amount).await {
        Ok(balance) => tracing::info!(user_id, amount, balance, "refunded failed conversion"),
        Err(e) => tracing::error!(
            user_id,
            amount,
            error = %e,
            "refund after failed conversion did not apply"
        ),
    }
}
