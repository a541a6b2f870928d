//! HTTP surface: routing, shared state and the small read-only endpoints.

mod chat;
mod voice;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use llm_client::{LlmError, LlmProvider};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::tts::{self, TtsBackend};
use crate::voices::{self, VoiceCatalog};

/// Per-process state shared by all handlers. A backend is present exactly
/// when its credentials were configured at startup.
#[derive(Clone, Default)]
pub struct AppState {
    pub tts: Option<Arc<dyn TtsBackend>>,
    pub llm: Option<Arc<dyn LlmProvider>>,
}

impl AppState {
    /// Build the backends the config has credentials for.
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let tts = if config.cloudflare.is_configured() {
            let backend = tts::create_backend(&config.cloudflare)
                .context("Failed to create TTS backend")?;
            Some(Arc::from(backend))
        } else {
            None
        };

        let llm = match llm_client::get_provider(&config.gemini) {
            Ok(provider) => Some(Arc::from(provider)),
            Err(LlmError::MissingApiKey { .. }) => None,
            Err(e) => return Err(e).context("Failed to create chat provider"),
        };

        Ok(Self { tts, llm })
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate-voice", post(voice::generate_voice))
        .route(
            "/api/generate-voice-chunked",
            post(voice::generate_voice_chunked),
        )
        .route("/api/voices", get(voices_handler))
        .route("/api/chat", post(chat::chat))
        .route("/api/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(bind_address: &str, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    log::info!("Running on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        log::info!("Shutting down");
    }
}

/// Unwrap a JSON body, turning axum's rejection into a 400.
fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, RelayError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| RelayError::Validation(rejection.body_text()))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    configured: bool,
    gemini_configured: bool,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        configured: state.tts.is_some(),
        gemini_configured: state.llm.is_some(),
    })
}

async fn voices_handler() -> Json<VoiceCatalog> {
    Json(voices::catalog())
}
