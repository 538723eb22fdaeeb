use http::StatusCode;
use serde::Serialize;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each feature crate's error type. The server layer
/// renders these into responses, keeping domain errors decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `insufficient_credits`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    ///
    /// Must never contain upstream response bodies, credentials, or secrets.
    fn client_message(&self) -> String;
}

/// JSON error envelope returned by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub code: u16,
}

impl ErrorBody {
    /// Build the envelope for any [`HttpError`]
    pub fn from_error<E: HttpError + ?Sized>(error: &E) -> Self {
        Self {
            error: ErrorDetails {
                message: error.client_message(),
                error_type: error.error_type().to_owned(),
                code: error.status_code().as_u16(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Teapot;

    impl std::fmt::Display for Teapot {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("teapot with secret sk_live_123")
        }
    }

    impl std::error::Error for Teapot {}

    impl HttpError for Teapot {
        fn status_code(&self) -> StatusCode {
            StatusCode::IM_A_TEAPOT
        }

        fn error_type(&self) -> &str {
            "teapot_error"
        }

        fn client_message(&self) -> String {
            "short and stout".to_owned()
        }
    }

    #[test]
    fn envelope_uses_client_message_not_display() {
        let body = serde_json::to_value(ErrorBody::from_error(&Teapot)).unwrap();

        assert_eq!(body["error"]["message"], "short and stout");
        assert_eq!(body["error"]["type"], "teapot_error");
        assert_eq!(body["error"]["code"], 418);
        assert!(!body.to_string().contains("sk_live_123"));
    }
}
