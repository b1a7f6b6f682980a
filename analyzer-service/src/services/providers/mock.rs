//! Mock provider implementation for testing.

use super::{ImagePayload, ProviderError, VisionProvider};
use async_trait::async_trait;

/// Mock vision provider returning a canned reply.
pub struct MockVisionProvider {
    reply: Option<String>,
}

impl MockVisionProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }

    /// A provider that fails every call.
    pub fn unavailable() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl VisionProvider for MockVisionProvider {
    async fn describe(
        &self,
        _prompt: &str,
        _image: &ImagePayload,
    ) -> Result<String, ProviderError> {
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(ProviderError::NotConfigured(
                "Mock vision provider not enabled".to_string(),
            )),
        }
    }
}
