pub mod elevenlabs;

use async_trait::async_trait;

use crate::types::{Audio, SynthesisRequest};

/// Trait for speech provider implementations
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize validated text with the given voice
    async fn synthesize(&self, request: &SynthesisRequest) -> crate::error::Result<Audio>;

    /// Get the provider name
    fn name(&self) -> &str;
}
