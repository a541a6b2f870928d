//! Chat-model client library for the voice-relay workspace
//!
//! Provides a provider-agnostic completion interface with:
//! - Gemini (`generateContent` REST API)
//! - Mock (scripted responses for tests)

pub mod config;
pub mod error;
pub mod provider;
pub mod providers;

pub use config::ProviderConfig;
pub use error::{LlmError, Result};
pub use provider::{LlmProvider, LlmRequest, LlmResponse, TokenUsage};
pub use providers::{GeminiProvider, MockProvider, get_provider};
