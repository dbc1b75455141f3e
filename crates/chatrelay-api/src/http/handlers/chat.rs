//! Session API handlers.
//!
//! Endpoints:
//! - POST /api/v1/sessions                                      - Create a session
//! - POST /api/v1/sessions/{id}/messages                        - Run a chat turn
//! - POST /api/v1/sessions/{id}/messages/{message_id}/regenerate - Regenerate a response
//! - GET  /api/v1/sessions/{id}/transcript                      - Read the transcript
//!
//! Each session's client sits behind its own mutex in the registry, so one
//! in-flight request owns the conversation log exclusively.

use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chatrelay_types::chat::{ChatOutcome, Role, TranscriptEntry};

use crate::http::error::AppError;
use crate::state::AppState;

/// Output token budget when a request does not specify one.
const DEFAULT_MAX_TOKENS: u32 = 256;

/// Response body for session creation.
#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for a chat turn.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
    pub max_tokens: Option<u32>,
}

/// Response body for a chat turn: the outcome payload plus the id of the
/// user turn, so a later regenerate can reference it.
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub message_id: u64,
    pub outcome: ChatOutcome,
}

/// Request body for a regenerate call.
#[derive(Debug, Default, Deserialize)]
pub struct RegenerateRequest {
    pub max_tokens: Option<u32>,
}

/// Response body for a transcript read.
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub entries: Vec<TranscriptEntry>,
    pub num_of_messages: usize,
}

/// POST /api/v1/sessions - Create a fresh conversation.
pub async fn create_session(State(state): State<AppState>) -> Json<CreateSessionResponse> {
    let session_id = state.sessions.create(state.new_client());
    let entry = state
        .sessions
        .get(session_id)
        .expect("session registered above");

    tracing::info!(session_id = %session_id, "session created");

    Json(CreateSessionResponse {
        session_id,
        model: state.model.clone(),
        created_at: entry.created_at,
    })
}

/// POST /api/v1/sessions/{id}/messages - Run a chat turn.
pub async fn send_message(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, AppError> {
    if request.content.is_empty() {
        return Err(AppError::Validation("content must not be empty".to_string()));
    }
    let max_tokens = request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);

    let entry = state
        .sessions
        .get(session_id)
        .ok_or(AppError::SessionNotFound)?;
    let mut client = entry.client.lock().await;

    let message = client.message(Role::User, request.content);
    let outcome = client.chat(&message, max_tokens).await?;

    Ok(Json(SendMessageResponse {
        message_id: message.id,
        outcome,
    }))
}

/// POST /api/v1/sessions/{id}/messages/{message_id}/regenerate - Regenerate
/// the response to an existing user turn in place.
pub async fn regenerate_response(
    State(state): State<AppState>,
    Path((session_id, message_id)): Path<(Uuid, u64)>,
    Json(request): Json<RegenerateRequest>,
) -> Result<Json<ChatOutcome>, AppError> {
    let max_tokens = request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);

    let entry = state
        .sessions
        .get(session_id)
        .ok_or(AppError::SessionNotFound)?;
    let mut client = entry.client.lock().await;

    let outcome = client.regenerate(message_id, max_tokens).await?;
    Ok(Json(outcome))
}

/// GET /api/v1/sessions/{id}/transcript - Read the conversation so far.
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<TranscriptResponse>, AppError> {
    let entry = state
        .sessions
        .get(session_id)
        .ok_or(AppError::SessionNotFound)?;
    let client = entry.client.lock().await;

    Ok(Json(TranscriptResponse {
        entries: client.log().entries().to_vec(),
        num_of_messages: client.log().len(),
    }))
}
