//! AI provider abstractions and implementations.
//!
//! This module provides a trait-based abstraction for vision-capable
//! providers, allowing easy swapping between backends (Gemini, mock).

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Image sent alongside the instruction text.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    /// MIME type detected from the decoded upload.
    pub mime_type: String,

    /// Original upload bytes.
    pub data: Vec<u8>,
}

/// Trait for vision-capable generation providers (e.g. Gemini).
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Send the prompt and image to the model and return its raw text reply.
    ///
    /// One synchronous call per request; callers are responsible for making
    /// sense of the reply text.
    async fn describe(&self, prompt: &str, image: &ImagePayload)
        -> Result<String, ProviderError>;
}
