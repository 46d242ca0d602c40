//! Axum route handlers for the Chat API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::chat::prompts::{GREETING, SUGGESTED_QUESTIONS};
use crate::chat::responder::{respond, ChatReply};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub greeting: &'static str,
    pub questions: Vec<&'static str>,
}

/// POST /api/v1/chat
///
/// Off-topic messages are answered locally without a completion call.
/// Completion failures return a fallback reply, not an error status.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    Ok(Json(respond(&request.message, &state.llm).await))
}

/// GET /api/v1/chat/suggestions
pub async fn handle_suggestions() -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        greeting: GREETING,
        questions: SUGGESTED_QUESTIONS.to_vec(),
    })
}
