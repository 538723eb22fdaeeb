#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod http_client;
mod provider;
mod proxy;
mod types;

pub use error::{Result, SpeechError};
pub use http_client::build_http_client;
pub use provider::{SpeechProvider, elevenlabs::ElevenLabsProvider};
pub use proxy::SynthesisProxy;
pub use types::{Audio, SynthesisRequest};
