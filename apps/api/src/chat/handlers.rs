use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::chat::assistant::{chat, ChatRequest, ChatResponse};
use crate::context::load_context;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/friday/chat
/// Malformed bodies are validation faults, rendered like every other error.
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload?;
    let context = load_context(&state.config.context_file).await;
    let response = chat(
        state.llm.as_ref(),
        state.sessions.as_ref(),
        &context,
        &request,
        state.config.llm_timeout,
    )
    .await?;
    Ok(Json(response))
}
