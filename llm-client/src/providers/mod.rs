//! LLM provider implementations

mod gemini;
pub mod mock;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;

use crate::config::{GEMINI_API_KEY_ENV, ProviderConfig};
use crate::error::{LlmError, Result};
use crate::provider::LlmProvider;

/// Create a provider instance from its config
///
/// Fails with `MissingApiKey` when the config carries no key, so callers can
/// treat the chat surface as unconfigured instead of aborting.
pub fn get_provider(config: &ProviderConfig) -> Result<Box<dyn LlmProvider>> {
    let api_key = get_api_key(config, GEMINI_API_KEY_ENV, "Gemini")?;
    Ok(Box::new(GeminiProvider::new(config, api_key)?))
}

/// Get API key from config
fn get_api_key(config: &ProviderConfig, env_var: &str, provider_name: &str) -> Result<String> {
    config
        .api_key
        .clone()
        .ok_or_else(|| LlmError::MissingApiKey {
            provider: provider_name.to_string(),
            env_var: env_var.to_string(),
        })
}
