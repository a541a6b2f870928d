//! voice-relay configuration, read once from the environment at startup.

use anyhow::{Context, Result};
use llm_client::ProviderConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";
const DEFAULT_TTS_MODEL: &str = "@cf/myshell-ai/melotts";
const DEFAULT_TTS_TIMEOUT_SECS: u64 = 30;

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// `APP_ENV=production`; turns debug logging off by default
    pub production: bool,
    /// Text-to-speech provider settings
    pub cloudflare: CloudflareConfig,
    /// Chat model settings
    pub gemini: ProviderConfig,
}

/// Cloudflare Workers AI settings for speech synthesis.
#[derive(Clone)]
pub struct CloudflareConfig {
    pub account_id: Option<String>,
    pub api_token: Option<String>,
    pub api_base: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for CloudflareConfig {
    fn default() -> Self {
        Self {
            account_id: None,
            api_token: None,
            api_base: DEFAULT_CLOUDFLARE_API_BASE.to_string(),
            model: DEFAULT_TTS_MODEL.to_string(),
            timeout_secs: DEFAULT_TTS_TIMEOUT_SECS,
        }
    }
}

impl CloudflareConfig {
    /// Both the account id and the API token are present.
    pub fn is_configured(&self) -> bool {
        self.account_id.is_some() && self.api_token.is_some()
    }
}

impl std::fmt::Debug for CloudflareConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareConfig")
            .field("account_id", &self.account_id.as_deref().map(mask_secret))
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl RelayConfig {
    /// Load config from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load config from an arbitrary key/value lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT value: {}", raw))?,
            None => DEFAULT_PORT,
        };

        let production = non_empty("APP_ENV")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let cloudflare = CloudflareConfig {
            account_id: non_empty("CLOUDFLARE_ACCOUNT_ID"),
            api_token: non_empty("CLOUDFLARE_API_TOKEN"),
            api_base: non_empty("CLOUDFLARE_API_BASE")
                .unwrap_or_else(|| DEFAULT_CLOUDFLARE_API_BASE.to_string()),
            ..CloudflareConfig::default()
        };

        Ok(Self {
            host: non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            production,
            cloudflare,
            gemini: ProviderConfig::from_lookup(&lookup)
                .context("Invalid Gemini configuration")?,
        })
    }

    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_level(&self, debug: bool) -> &'static str {
        if debug || !self.production {
            "debug"
        } else {
            "info"
        }
    }
}

/// First 8 characters of a secret followed by `...`, for startup logs.
pub fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(8).collect();
    format!("{}...", prefix)
}
