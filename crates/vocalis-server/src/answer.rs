use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{error::ApiError, extract::JsonBody, state::SharedState};

/// `POST /api/generate-answer`
pub async fn generate_answer(
    State(state): State<SharedState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<Value>, ApiError> {
    let question = vocalis_answer::question_from(&body)?;
    let answer = state.answer.answer(question).await?;
    Ok(Json(json!({ "answer": answer })))
}
