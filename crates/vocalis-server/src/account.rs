use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use serde_json::{Value, json};
use vocalis_core::UserIdentity;
use vocalis_ledger::UsageEntry;

use crate::{error::ApiError, state::SharedState};

/// `GET /api/credits`
pub async fn credits(
    State(state): State<SharedState>,
    Extension(user): Extension<Arc<UserIdentity>>,
) -> Result<Json<Value>, ApiError> {
    let balance = state.store.balance(&user.id).await?;
    Ok(Json(json!({ "balance": balance })))
}

/// `GET /api/history`, newest first
pub async fn history(
    State(state): State<SharedState>,
    Extension(user): Extension<Arc<UserIdentity>>,
) -> Result<Json<Vec<UsageEntry>>, ApiError> {
    let entries = state.store.history(&user.id, state.history_limit).await?;
    Ok(Json(entries))
}

/// `POST /api/welcome`
pub async fn welcome(
    State(state): State<SharedState>,
    Extension(user): Extension<Arc<UserIdentity>>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state.store.grant_welcome(&user.id, state.welcome_credits).await?;

    if outcome.granted() {
        tracing::info!(user_id = %user.id, credits = state.welcome_credits, "welcome credits granted");

        if let (Some(notifier), Some(email)) = (&state.notifier, &user.email) {
            notifier.signup(email);
        }
    }

    Ok(Json(json!({ "granted": outcome.granted(), "balance": outcome.balance() })))
}
