use http::StatusCode;
use thiserror::Error;
use vocalis_core::HttpError;

pub type Result<T> = std::result::Result<T, SpeechError>;

/// Speech synthesis errors
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Text or voice failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Provider answered with a non-success status
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Provider answered 2xx with no audio
    #[error("Provider returned an empty audio body")]
    EmptyAudio,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl HttpError for SpeechError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ProviderApiError { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            Self::ConnectionError(_) | Self::EmptyAudio => StatusCode::BAD_GATEWAY,
            Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::ProviderApiError { .. } | Self::ConnectionError(_) | Self::EmptyAudio => "synthesis_error",
            Self::ConfigError(_) => "configuration_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::InvalidRequest(message) => message.clone(),
            Self::ProviderApiError { .. } | Self::ConnectionError(_) | Self::EmptyAudio => {
                "Voice conversion failed. Try again.".to_string()
            }
            Self::ConfigError(_) => "Server misconfiguration".to_string(),
        }
    }
}
