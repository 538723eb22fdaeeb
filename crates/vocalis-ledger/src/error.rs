use http::StatusCode;
use vocalis_core::HttpError;

/// Errors returned by credit stores
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The balance does not cover the requested debit
    #[error("insufficient credits: {required} required")]
    InsufficientCredits {
        /// Credits the operation needed
        required: i64,
    },

    /// HTTP transport or connection error talking to the data service
    #[error("data service request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The data service returned a non-success status
    #[error("data service error ({status}): {message}")]
    Api {
        /// HTTP status from the data service
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// The data service answered with a body we could not interpret
    #[error("unexpected data service response: {0}")]
    InvalidResponse(String),
}

impl HttpError for LedgerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InsufficientCredits { .. } => StatusCode::PAYMENT_REQUIRED,
            Self::Request(_) | Self::Api { .. } | Self::InvalidResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InsufficientCredits { .. } => "insufficient_credits",
            Self::Request(_) | Self::Api { .. } | Self::InvalidResponse(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::InsufficientCredits { .. } => "Not enough credits. Please top up.".to_string(),
            Self::Request(_) | Self::Api { .. } | Self::InvalidResponse(_) => "Internal server error".to_string(),
        }
    }
}
