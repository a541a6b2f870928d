//! Speech synthesis endpoints.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use super::{AppState, parse_body};
use crate::error::RelayError;
use crate::text;
use crate::tts::{TtsBackend, TtsOptions};
use crate::voices::Language;

const CREDENTIALS_MISSING: &str =
    "Cloudflare credentials not configured. Please check your .env file.";
const CREDENTIALS_MISSING_CHUNKED: &str = "Cloudflare credentials not configured.";

#[derive(Debug, Deserialize)]
pub struct VoiceRequest {
    #[serde(default)]
    pub text: String,
    /// Client language code (`EN`, `JP`, ...); unknown or absent means English
    #[serde(default)]
    pub language: Option<String>,
}

impl VoiceRequest {
    fn require_text(&self) -> Result<&str, RelayError> {
        if self.text.is_empty() {
            return Err(RelayError::Validation("Text is required".to_string()));
        }
        Ok(&self.text)
    }

    fn language(&self) -> Language {
        Language::resolve(self.language.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct ChunkedVoiceResponse {
    pub chunks: Vec<String>,
    pub total: usize,
}

/// `POST /api/generate-voice`: synthesize the text and return WAV bytes.
pub async fn generate_voice(
    State(state): State<AppState>,
    payload: Result<Json<VoiceRequest>, JsonRejection>,
) -> Result<Response, RelayError> {
    let tts = state
        .tts
        .as_deref()
        .ok_or_else(|| RelayError::Configuration(CREDENTIALS_MISSING.to_string()))?;
    let request = parse_body(payload)?;
    let text = request.require_text()?;

    synthesize(tts, text, request.language()).await
}

/// `POST /api/generate-voice-chunked`: split long text into chunks for the
/// client to synthesize one by one. Text that fits in one chunk is
/// synthesized directly, exactly as `generate-voice` would.
pub async fn generate_voice_chunked(
    State(state): State<AppState>,
    payload: Result<Json<VoiceRequest>, JsonRejection>,
) -> Result<Response, RelayError> {
    let tts = state
        .tts
        .as_deref()
        .ok_or_else(|| RelayError::Configuration(CREDENTIALS_MISSING_CHUNKED.to_string()))?;
    let request = parse_body(payload)?;
    let text = request.require_text()?;

    let chunks = text::process_text(text);
    if chunks.len() <= 1 {
        return synthesize(tts, text, request.language()).await;
    }

    log::debug!(
        "Split {} chars into {} chunks",
        text.chars().count(),
        chunks.len()
    );
    Ok(Json(ChunkedVoiceResponse {
        total: chunks.len(),
        chunks,
    })
    .into_response())
}

async fn synthesize(
    tts: &dyn TtsBackend,
    text: &str,
    language: Language,
) -> Result<Response, RelayError> {
    let options = TtsOptions::new().with_language(language);
    let audio = tts
        .synthesize(text, &options)
        .await
        .inspect_err(|e| log::warn!("{} synthesis failed: {}", tts.name(), e))?;

    Ok((
        [
            (header::CONTENT_TYPE, "audio/wav"),
            (
                header::CONTENT_DISPOSITION,
                "inline; filename=\"generated_voice.wav\"",
            ),
        ],
        audio,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;

    use super::super::router;
    use super::super::testing::{post_json, send};
    use super::*;
    use crate::tts::TtsError;
    use crate::tts::mock::MockBackend;

    const WAV: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt ";

    fn state_with(backend: Arc<MockBackend>) -> AppState {
        AppState {
            tts: Some(backend),
            llm: None,
        }
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let request = post_json("/api/generate-voice", json!({"text": "Hello"}));
        let response = send(router(AppState::default()), request).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json(),
            json!({"error": "Cloudflare credentials not configured. Please check your .env file."})
        );
    }

    #[tokio::test]
    async fn test_credentials_checked_before_text() {
        let request = post_json("/api/generate-voice", json!({"text": ""}));
        let response = send(router(AppState::default()), request).await;
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_empty_text() {
        let backend = Arc::new(MockBackend::always_succeeds(WAV));
        let request = post_json("/api/generate-voice", json!({"text": ""}));
        let response = send(router(state_with(backend.clone())), request).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json(), json!({"error": "Text is required"}));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_text_field() {
        let backend = Arc::new(MockBackend::always_succeeds(WAV));
        let request = post_json("/api/generate-voice", json!({"language": "EN"}));
        let response = send(router(state_with(backend)), request).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json(), json!({"error": "Text is required"}));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let backend = Arc::new(MockBackend::always_succeeds(WAV));
        let request = Request::post("/api/generate-voice")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = send(router(state_with(backend)), request).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(response.json()["error"].is_string());
    }

    #[tokio::test]
    async fn test_returns_wav() {
        let backend = Arc::new(MockBackend::always_succeeds(WAV));
        let request = post_json(
            "/api/generate-voice",
            json!({"text": "Konnichiwa", "language": "JP"}),
        );
        let response = send(router(state_with(backend.clone())), request).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.headers[header::CONTENT_TYPE], "audio/wav");
        assert_eq!(response.body, WAV);
        assert_eq!(
            backend.calls(),
            vec![("Konnichiwa".to_string(), Language::Japanese)]
        );
    }

    #[tokio::test]
    async fn test_unknown_language_falls_back_to_english() {
        let backend = Arc::new(MockBackend::always_succeeds(WAV));
        let request = post_json("/api/generate-voice", json!({"text": "Hi", "language": "DE"}));
        send(router(state_with(backend.clone())), request).await;

        assert_eq!(backend.calls()[0].1, Language::English);
    }

    #[tokio::test]
    async fn test_upstream_timeout() {
        let backend = Arc::new(MockBackend::always_fails(TtsError::Timeout));
        let request = post_json("/api/generate-voice", json!({"text": "Hello"}));
        let response = send(router(state_with(backend)), request).await;

        assert_eq!(response.status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            response.json(),
            json!({"error": "Request timed out. Please try again."})
        );
    }

    #[tokio::test]
    async fn test_upstream_status_propagated() {
        let backend = Arc::new(MockBackend::always_fails(TtsError::Api {
            status: 401,
            message: "Authentication error".to_string(),
        }));
        let request = post_json("/api/generate-voice", json!({"text": "Hello"}));
        let response = send(router(state_with(backend)), request).await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.json(), json!({"error": "Authentication error"}));
    }

    #[tokio::test]
    async fn test_malformed_upstream_payload() {
        let backend = Arc::new(MockBackend::always_fails(TtsError::InvalidResponse));
        let request = post_json("/api/generate-voice", json!({"text": "Hello"}));
        let response = send(router(state_with(backend)), request).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json(),
            json!({"error": "Invalid response format from API"})
        );
    }

    #[tokio::test]
    async fn test_chunked_missing_credentials() {
        let request = post_json("/api/generate-voice-chunked", json!({"text": "Hello"}));
        let response = send(router(AppState::default()), request).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json(),
            json!({"error": "Cloudflare credentials not configured."})
        );
    }

    #[tokio::test]
    async fn test_chunked_empty_text() {
        let backend = Arc::new(MockBackend::always_succeeds(WAV));
        let request = post_json("/api/generate-voice-chunked", json!({"text": ""}));
        let response = send(router(state_with(backend)), request).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json(), json!({"error": "Text is required"}));
    }

    #[tokio::test]
    async fn test_whitespace_text_is_synthesized() {
        let backend = Arc::new(MockBackend::always_succeeds(WAV));
        let request = post_json("/api/generate-voice", json!({"text": "   "}));
        let response = send(router(state_with(backend.clone())), request).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, WAV);
        assert_eq!(backend.calls(), vec![("   ".to_string(), Language::English)]);
    }

    #[tokio::test]
    async fn test_chunked_whitespace_text_is_synthesized() {
        let backend = Arc::new(MockBackend::always_succeeds(WAV));
        let request = post_json("/api/generate-voice-chunked", json!({"text": " \n "}));
        let response = send(router(state_with(backend.clone())), request).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.headers[header::CONTENT_TYPE], "audio/wav");
        assert_eq!(backend.calls(), vec![(" \n ".to_string(), Language::English)]);
    }

    #[tokio::test]
    async fn test_lowercase_language_code_falls_back_to_english() {
        let backend = Arc::new(MockBackend::always_succeeds(WAV));
        let request = post_json("/api/generate-voice", json!({"text": "Hi", "language": "jp"}));
        send(router(state_with(backend.clone())), request).await;

        assert_eq!(backend.calls()[0].1, Language::English);
    }

    #[tokio::test]
    async fn test_chunked_short_text_synthesizes_directly() {
        let backend = Arc::new(MockBackend::always_succeeds(WAV));
        let request = post_json(
            "/api/generate-voice-chunked",
            json!({"text": "**Short** text. Two sentences!", "language": "FR"}),
        );
        let response = send(router(state_with(backend.clone())), request).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, WAV);
        assert_eq!(
            backend.calls(),
            vec![(
                "**Short** text. Two sentences!".to_string(),
                Language::French
            )]
        );
    }

    #[tokio::test]
    async fn test_chunked_long_text_returns_chunks() {
        let backend = Arc::new(MockBackend::always_succeeds(WAV));
        let sentence = "This sentence is padded out to be roughly sixty characters long.";
        let text = vec![sentence; 12].join(" ");
        let request = post_json("/api/generate-voice-chunked", json!({"text": text}));
        let response = send(router(state_with(backend.clone())), request).await;

        assert_eq!(response.status, StatusCode::OK);
        let body = response.json();
        let chunks = body["chunks"].as_array().unwrap();
        assert!(chunks.len() > 1);
        assert_eq!(body["total"], chunks.len());
        for chunk in chunks {
            assert!(chunk.as_str().unwrap().chars().count() <= 400);
        }
        assert!(backend.calls().is_empty());
    }
}
