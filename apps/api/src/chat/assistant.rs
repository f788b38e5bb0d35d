//! FRIDAY chat — one enriched LLM call per message, with per-session history.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chat::prompts::CHAT_PROMPT;
use crate::chat::session_store::SessionStore;
use crate::context::UserContext;
use crate::errors::AppError;
use crate::llm_client::prompts::{fill, FRIDAY_PERSONA};
use crate::llm_client::{converse, Completion, Turn};

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Answers `message` within `session_id`.
///
/// The session stays locked for the whole exchange. Turns are appended only
/// after a successful reply, so a failed call leaves the history untouched.
pub async fn chat(
    llm: &dyn Completion,
    sessions: &dyn SessionStore,
    context: &UserContext,
    request: &ChatRequest,
    timeout: Duration,
) -> Result<ChatResponse, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }
    if request.session_id.trim().is_empty() {
        return Err(AppError::Validation("session_id cannot be empty".to_string()));
    }

    let prompt = build_chat_prompt(context, &request.message);

    let handle = sessions.session(&request.session_id);
    let mut history = handle.lock().await;

    if history.is_empty() {
        info!("Starting chat session {}", request.session_id);
    }
    info!(
        "Sending enriched prompt for session {} ({} prior turns)",
        request.session_id,
        history.len()
    );
    let reply = converse(llm, history.turns(), &prompt, timeout)
        .await
        .map_err(|e| AppError::from(e).in_stage("FRIDAY chat"))?;

    history.push(Turn::user(request.message.clone()));
    history.push(Turn::model(reply.clone()));

    Ok(ChatResponse { response: reply })
}

fn build_chat_prompt(context: &UserContext, message: &str) -> String {
    fill(
        CHAT_PROMPT,
        &[
            ("persona", FRIDAY_PERSONA),
            ("name", context.name()),
            ("team", context.team()),
            ("area", context.area()),
            ("manager", context.manager()),
            ("message", message),
        ],
    )
}
