use crate::error::{LlmError, Result};

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable holding the per-request timeout in seconds
pub const GEMINI_TIMEOUT_ENV: &str = "GEMINI_TIMEOUT_SECS";

/// Provider-specific configuration
#[derive(Clone)]
pub struct ProviderConfig {
    /// API key
    pub api_key: Option<String>,

    /// Model name/identifier for the provider
    pub model: String,

    /// Custom base URL
    pub base_url: Option<String>,

    /// Per-request timeout; `None` leaves the HTTP client default in place
    pub timeout_secs: Option<u64>,
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: None,
            timeout_secs: None,
        }
    }
}

impl ProviderConfig {
    /// Build a config from a key/value lookup (normally `std::env::var`).
    ///
    /// Reads `GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_API_BASE` and
    /// `GEMINI_TIMEOUT_SECS`. Empty values count as unset; a timeout that is
    /// not a positive integer is a `ConfigError`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match non_empty(GEMINI_TIMEOUT_ENV) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs),
                _ => {
                    return Err(LlmError::ConfigError(format!(
                        "Invalid {} value: {}",
                        GEMINI_TIMEOUT_ENV, raw
                    )));
                }
            },
            None => None,
        };

        Ok(Self {
            api_key: non_empty(GEMINI_API_KEY_ENV),
            model: non_empty("GEMINI_MODEL").unwrap_or_else(default_model),
            base_url: non_empty("GEMINI_API_BASE"),
            timeout_secs,
        })
    }

    /// Whether an API key is present
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
