//! Tutor chat endpoint.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use super::{AppState, parse_body};
use crate::error::RelayError;
use crate::text::clean_text;
use crate::tutor::{self, ChatTurn};

const API_KEY_MISSING: &str = "Gemini API key not configured. Please check your .env file.";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Option<Vec<ChatTurn>>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub success: bool,
}

/// `POST /api/chat`: one tutor turn. The reply is cleaned for speech before it is returned.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, RelayError> {
    let llm = state
        .llm
        .as_deref()
        .ok_or_else(|| RelayError::Configuration(API_KEY_MISSING.to_string()))?;
    let request = parse_body(payload)?;

    if request.message.is_empty() {
        return Err(RelayError::Validation("Message is required".to_string()));
    }

    let history = request.history.unwrap_or_default();
    let reply = llm
        .complete(tutor::tutor_request(&request.message, &history))
        .await
        .map_err(|e| {
            log::warn!("{} request failed: {}", llm.name(), e);
            RelayError::Internal(format!("Gemini API error: {}", e))
        })?;

    Ok(Json(ChatResponse {
        response: clean_text(&reply.content),
        success: true,
    }))
}
