use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use vocalis_core::{ErrorBody, HttpError};

/// Any domain error, rendered as the shared JSON envelope
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: vocalis_core::ErrorDetails {
                    message: message.into(),
                    error_type: "invalid_request_error".to_string(),
                    code: StatusCode::BAD_REQUEST.as_u16(),
                },
            },
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                error: vocalis_core::ErrorDetails {
                    message: "Internal server error".to_string(),
                    error_type: "internal_error".to_string(),
                    code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                },
            },
        }
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl<E: HttpError> From<E> for ApiError {
    fn from(error: E) -> Self {
        let status = error.status_code();

        if status.is_server_error() {
            tracing::error!(error = %error, status = status.as_u16(), "request failed");
        } else {
            tracing::debug!(error = %error, status = status.as_u16(), "request rejected");
        }

        Self {
            status,
            body: ErrorBody::from_error(&error),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
