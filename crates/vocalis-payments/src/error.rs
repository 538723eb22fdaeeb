use http::StatusCode;
use vocalis_core::HttpError;
use vocalis_ledger::LedgerError;

use crate::SignatureError;

/// Payment and webhook errors
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// Payment processor returned a non-success status
    #[error("payment processor error ({status}): {message}")]
    Provider {
        /// HTTP status from the processor
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// HTTP transport or connection error talking to the processor
    #[error("payment processor request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("webhook signature verification failed: {0}")]
    Signature(#[from] SignatureError),

    /// Signed body was not a well-formed event
    #[error("invalid webhook payload: {0}")]
    InvalidPayload(String),

    /// No strategy in the recipient chain found a user
    #[error("no recipient for checkout session {session_id}")]
    UnresolvedRecipient { session_id: String },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl HttpError for PaymentError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Provider { .. } | Self::Request(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Signature(_) | Self::InvalidPayload(_) | Self::UnresolvedRecipient { .. } => StatusCode::BAD_REQUEST,
            Self::Ledger(e) => e.status_code(),
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Provider { .. } | Self::Request(_) => "payment_error",
            Self::Signature(_) => "signature_error",
            Self::InvalidPayload(_) => "invalid_request_error",
            Self::UnresolvedRecipient { .. } => "unresolved_recipient",
            Self::Ledger(e) => e.error_type(),
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Provider { .. } | Self::Request(_) => "Failed to create checkout session".to_string(),
            Self::Signature(_) => "Webhook signature verification failed".to_string(),
            Self::InvalidPayload(_) => "Invalid webhook payload".to_string(),
            Self::UnresolvedRecipient { .. } => "No user could be resolved for this checkout session".to_string(),
            Self::Ledger(e) => e.client_message(),
        }
    }
}
