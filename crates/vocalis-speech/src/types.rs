use axum::{
    body::Body,
    response::{IntoResponse, Response},
};
use bytes::Bytes;

/// Validated synthesis input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: String,
}

/// Synthesized MPEG audio
#[derive(Debug, Clone)]
pub struct Audio {
    pub bytes: Bytes,
}

impl Audio {
    pub const CONTENT_TYPE: &'static str = "audio/mpeg";

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl IntoResponse for Audio {
    fn into_response(self) -> Response {
        ([(http::header::CONTENT_TYPE, Self::CONTENT_TYPE)], Body::from(self.bytes)).into_response()
    }
}
