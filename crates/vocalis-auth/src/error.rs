use http::StatusCode;
use vocalis_core::HttpError;

/// Identity gate errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No bearer credential, or a malformed `Authorization` header
    #[error("missing or malformed bearer credential")]
    Unauthenticated,

    /// The auth service rejected the credential
    #[error("invalid credential")]
    InvalidCredential,

    /// The auth service could not be reached
    #[error("identity lookup failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The auth service answered with an unexpected status
    #[error("auth service error ({status})")]
    ServiceError {
        /// HTTP status code returned by the auth service
        status: u16,
    },
}

impl HttpError for AuthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_type(&self) -> &str {
        "authentication_error"
    }

    fn client_message(&self) -> String {
        match self {
            Self::Unauthenticated => "Authentication required".to_string(),
            Self::InvalidCredential | Self::Request(_) | Self::ServiceError { .. } => {
                "Invalid or expired session".to_string()
            }
        }
    }
}
