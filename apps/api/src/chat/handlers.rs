//! Axum route handlers for the Chat API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::chat::engine::AnswerOrigin;
use crate::chat::formatter::ResponseMode;
use crate::chat::session::SessionContext;
use crate::chat::suggestions::{greeting, seed_questions};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default)]
    pub mode: Option<ResponseMode>,
    #[serde(default)]
    pub conversation_id: Option<Uuid>,
    #[serde(default, alias = "apiKey")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub use_llm: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub suggestions: Vec<String>,
    pub sources: Vec<String>,
    pub origin: AnswerOrigin,
    pub conversation_id: Uuid,
    pub answered_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct StarterResponse {
    pub greeting: String,
    pub questions: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let query = req.query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("query must not be empty".to_string()));
    }

    let conversation_id = req.conversation_id.unwrap_or_else(Uuid::new_v4);
    let _in_flight = state.conversations.try_begin(conversation_id).ok_or_else(|| {
        AppError::Conflict(format!(
            "conversation {conversation_id} already has a request in flight"
        ))
    })?;

    let session = SessionContext::resolve(state.direct.has_server_key(), req.api_key, req.use_llm);
    let mode = req.mode.unwrap_or(state.config.default_mode);

    let answer = state
        .engine
        .answer(
            query,
            mode,
            &session,
            Some(state.augmenter.as_ref()),
            state.config.augment_timeout,
        )
        .await;

    info!(
        %conversation_id,
        %mode,
        origin = ?answer.origin,
        sources = answer.sources.len(),
        "Answered chat query"
    );

    Ok(Json(ChatResponse {
        answer: answer.text,
        suggestions: answer.suggestions,
        sources: answer.sources,
        origin: answer.origin,
        conversation_id,
        answered_at: Utc::now(),
    }))
}

/// GET /api/v1/check-key
pub async fn handle_check_key(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "hasKey": state.direct.has_server_key() }))
}

/// GET /api/v1/chat/starter
pub async fn handle_starter(State(state): State<AppState>) -> Json<StarterResponse> {
    Json(StarterResponse {
        greeting: greeting(&state.profile),
        questions: seed_questions(&state.profile),
    })
}
