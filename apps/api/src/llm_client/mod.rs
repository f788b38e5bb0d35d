/// LLM Client — the single point of entry for all Gemini calls in FRIDAY.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Pipelines depend on the `Completion` trait and go through `complete` / `converse`,
/// which enforce the configuration check and the per-call timeout.
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub mod extract;
pub mod gemini;
pub mod prompts;

pub use extract::extract_json;
pub use gemini::GeminiClient;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("The Gemini API is not configured.")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM call timed out after {0:?}")]
    Timeout(Duration),
}

/// Author of a conversation turn, in Gemini's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One conversation turn: `{ "role": "user", "parts": ["..."] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub parts: Vec<String>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![text.into()],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![text.into()],
        }
    }

    /// All parts joined with newlines.
    pub fn text(&self) -> String {
        self.parts.join("\n")
    }
}

/// A text-generation backend. Carried in `AppState` as `Arc<dyn Completion>`.
///
/// Implementations only translate turns to text; timeouts and the
/// configuration check live in [`complete`] and [`converse`].
#[async_trait]
pub trait Completion: Send + Sync {
    /// False when the backend was built without credentials.
    fn is_configured(&self) -> bool {
        true
    }

    async fn generate(&self, turns: &[Turn]) -> Result<String, LlmError>;
}

/// Single-prompt completion bounded by `timeout`.
pub async fn complete(
    llm: &dyn Completion,
    prompt: &str,
    timeout: Duration,
) -> Result<String, LlmError> {
    converse(llm, &[], prompt, timeout).await
}

/// Sends `history` followed by `prompt` as a new user turn, bounded by `timeout`.
pub async fn converse(
    llm: &dyn Completion,
    history: &[Turn],
    prompt: &str,
    timeout: Duration,
) -> Result<String, LlmError> {
    if !llm.is_configured() {
        return Err(LlmError::NotConfigured);
    }

    let mut turns = history.to_vec();
    turns.push(Turn::user(prompt));

    match tokio::time::timeout(timeout, llm.generate(&turns)).await {
        Ok(result) => result,
        Err(_) => {
            warn!("LLM call exceeded {:?}, abandoning", timeout);
            Err(LlmError::Timeout(timeout))
        }
    }
}
