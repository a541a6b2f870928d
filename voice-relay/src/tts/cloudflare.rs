//! Cloudflare Workers AI TTS backend.
//!
//! Sends text to the MeloTTS model over the Workers AI REST API and decodes
//! the base64 WAV it returns. Each call is a single attempt bounded by the
//! configured timeout.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{TtsBackend, TtsError, TtsOptions};
use crate::config::CloudflareConfig;

/// Cloudflare Workers AI backend.
pub struct CloudflareBackend {
    /// Full model run URL
    endpoint: String,
    api_token: String,
    client: Client,
}

impl CloudflareBackend {
    /// Create a new Cloudflare backend.
    pub fn new(config: &CloudflareConfig) -> Result<Self> {
        let (Some(account_id), Some(api_token)) = (&config.account_id, &config.api_token) else {
            anyhow::bail!("Cloudflare credentials not configured (account id and API token)");
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            endpoint: run_endpoint(&config.api_base, account_id, &config.model),
            api_token: api_token.clone(),
            client,
        })
    }
}

fn run_endpoint(api_base: &str, account_id: &str, model: &str) -> String {
    format!(
        "{}/accounts/{}/ai/run/{}",
        api_base.trim_end_matches('/'),
        account_id,
        model
    )
}

// Workers AI request/response types

#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    prompt: &'a str,
    lang: &'static str,
}

#[derive(Debug, Deserialize)]
struct RunResponse {
    result: Option<RunResult>,
}

#[derive(Debug, Deserialize)]
struct RunResult {
    audio: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Decode the WAV bytes out of a successful run response.
fn decode_audio(body: &[u8]) -> Result<Vec<u8>, TtsError> {
    let response: RunResponse =
        serde_json::from_slice(body).map_err(|_| TtsError::InvalidResponse)?;

    let audio = response
        .result
        .and_then(|r| r.audio)
        .ok_or(TtsError::InvalidResponse)?;

    BASE64
        .decode(audio.trim())
        .map_err(|e| TtsError::Internal(format!("Failed to decode audio: {}", e)))
}

/// Best-effort message from an error body, falling back to the status code.
fn error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .and_then(|r| r.errors.into_iter().next())
        .map(|e| e.message)
        .unwrap_or_else(|| format!("Cloudflare API Error: {}", status))
}

fn transport_error(e: reqwest::Error) -> TtsError {
    if e.is_timeout() {
        TtsError::Timeout
    } else {
        TtsError::Network(e.to_string())
    }
}

#[async_trait]
impl TtsBackend for CloudflareBackend {
    async fn synthesize(&self, text: &str, options: &TtsOptions) -> Result<Vec<u8>, TtsError> {
        let payload = RunRequest {
            prompt: text,
            lang: options.language.engine_code(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        if !status.is_success() {
            let message = error_message(status.as_u16(), &body);
            log::warn!("Cloudflare TTS returned HTTP {}: {}", status.as_u16(), message);
            return Err(TtsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let audio = decode_audio(&body)?;
        log::debug!(
            "Synthesized {} chars ({}) into {} bytes",
            text.chars().count(),
            options.language.code(),
            audio.len()
        );
        Ok(audio)
    }

    fn name(&self) -> &'static str {
        "Cloudflare Workers AI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voices::Language;

    fn configured() -> CloudflareConfig {
        CloudflareConfig {
            account_id: Some("acct".to_string()),
            api_token: Some("token".to_string()),
            ..CloudflareConfig::default()
        }
    }

    #[test]
    fn test_backend_creation() {
        let backend = CloudflareBackend::new(&configured()).unwrap();
        assert_eq!(
            backend.endpoint,
            "https://api.cloudflare.com/client/v4/accounts/acct/ai/run/@cf/myshell-ai/melotts"
        );
        assert_eq!(backend.name(), "Cloudflare Workers AI");
    }

    #[test]
    fn test_backend_creation_without_token() {
        let config = CloudflareConfig {
            api_token: None,
            ..configured()
        };
        let result = CloudflareBackend::new(&config);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_endpoint_trims_slash() {
        assert_eq!(
            run_endpoint("http://localhost:8787/", "a1", "@cf/m"),
            "http://localhost:8787/accounts/a1/ai/run/@cf/m"
        );
    }

    #[test]
    fn test_request_payload() {
        let payload = RunRequest {
            prompt: "Bonjour",
            lang: Language::French.engine_code(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value, serde_json::json!({"prompt": "Bonjour", "lang": "fr"}));
    }

    #[test]
    fn test_decode_audio() {
        let wav = b"RIFF\x24\x00\x00\x00WAVE";
        let body = serde_json::json!({
            "result": {"audio": BASE64.encode(wav)},
            "success": true,
            "errors": [],
        });
        let decoded = decode_audio(body.to_string().as_bytes()).unwrap();
        assert_eq!(decoded, wav);
    }

    #[test]
    fn test_decode_audio_missing_field() {
        let body = br#"{"result": {}, "success": true}"#;
        assert!(matches!(decode_audio(body), Err(TtsError::InvalidResponse)));

        let body = br#"{"success": true}"#;
        assert!(matches!(decode_audio(body), Err(TtsError::InvalidResponse)));
    }

    #[test]
    fn test_decode_audio_not_json() {
        assert!(matches!(
            decode_audio(b"<html>oops</html>"),
            Err(TtsError::InvalidResponse)
        ));
    }

    #[test]
    fn test_decode_audio_bad_base64() {
        let body = br#"{"result": {"audio": "***not base64***"}}"#;
        assert!(matches!(decode_audio(body), Err(TtsError::Internal(_))));
    }

    #[test]
    fn test_error_message_from_body() {
        let body = br#"{"success": false, "errors": [{"code": 10000, "message": "Authentication error"}]}"#;
        assert_eq!(error_message(401, body), "Authentication error");
    }

    #[test]
    fn test_error_message_fallback() {
        assert_eq!(error_message(502, b"Bad Gateway"), "Cloudflare API Error: 502");
        assert_eq!(
            error_message(500, br#"{"errors": []}"#),
            "Cloudflare API Error: 500"
        );
    }
}
