//! TTS backend trait and types.

pub mod cloudflare;
#[cfg(test)]
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::config::CloudflareConfig;
use crate::voices::Language;

/// Options for a single synthesis call.
#[derive(Debug, Clone, Default)]
pub struct TtsOptions {
    /// Spoken language
    pub language: Language,
}

impl TtsOptions {
    /// Create new TTS options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

/// Failure of a synthesis call. One attempt per call, no retries.
#[derive(Error, Debug, Clone)]
pub enum TtsError {
    #[error("Request timed out. Please try again.")]
    Timeout,

    /// Non-2xx answer; `message` is the provider's own text when it could be parsed
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response format from API")]
    InvalidResponse,

    #[error("Server error: {0}")]
    Internal(String),
}

/// TTS backend trait - all TTS engines implement this.
#[async_trait]
pub trait TtsBackend: Send + Sync {
    /// Synthesize text and return the encoded audio (WAV).
    async fn synthesize(&self, text: &str, options: &TtsOptions) -> Result<Vec<u8>, TtsError>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}

/// Create a TTS backend.
///
/// Fails if the Cloudflare credentials are missing or the HTTP client cannot be built.
pub fn create_backend(config: &CloudflareConfig) -> Result<Box<dyn TtsBackend>> {
    Ok(Box::new(cloudflare::CloudflareBackend::new(config)?))
}
