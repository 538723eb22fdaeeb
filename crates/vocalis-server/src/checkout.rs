use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use serde_json::{Value, json};
use vocalis_core::UserIdentity;

use crate::{error::ApiError, state::SharedState};

/// `POST /api/create-checkout-session`
pub async fn create_checkout_session(
    State(state): State<SharedState>,
    Extension(user): Extension<Arc<UserIdentity>>,
) -> Result<Json<Value>, ApiError> {
    let session_id = state.checkout.create_session(&user).await?;
    Ok(Json(json!({ "sessionId": session_id })))
}
