use http::StatusCode;
use vocalis_core::HttpError;

#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    /// Body had no non-empty string `question`
    #[error("question is required")]
    MissingQuestion,

    /// No API key configured for the answer backend
    #[error("answer backend is not configured")]
    NotConfigured,

    #[error("answer backend failed: {0}")]
    Upstream(String),
}

impl HttpError for AnswerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingQuestion => StatusCode::BAD_REQUEST,
            Self::NotConfigured | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::MissingQuestion => "invalid_request_error",
            Self::NotConfigured => "configuration_error",
            Self::Upstream(_) => "api_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::MissingQuestion => "Question is required".to_string(),
            Self::NotConfigured => "Server misconfiguration".to_string(),
            Self::Upstream(_) => "Failed to generate answer".to_string(),
        }
    }
}
