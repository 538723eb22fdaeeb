use axum::extract::{FromRequest, Request, rejection::JsonRejection};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body extractor whose rejections use the shared error envelope
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(request, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_to_error(&rejection)),
        }
    }
}

fn rejection_to_error(rejection: &JsonRejection) -> ApiError {
    tracing::debug!(error = %rejection.body_text(), "rejected request body");

    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::invalid_request("Expected a request body with 'Content-Type: application/json'")
        }
        _ => ApiError::invalid_request("Request body is not valid JSON"),
    }
}
