use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level fault type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{"detail": <message>}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Configuration(String),

    #[error("User context is not set. Please edit context.json.")]
    ContextUnset,

    #[error("{0}")]
    Upstream(String),

    #[error("Failed to parse LLM response as JSON: {0}")]
    Parse(String),

    #[error("{0}")]
    Llm(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::NotConfigured => {
                AppError::Configuration(LlmError::NotConfigured.to_string())
            }
            LlmError::Parse(e) => AppError::Parse(e.to_string()),
            other => AppError::Llm(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    /// Prefixes the message of LLM faults with the stage that raised them.
    /// Configuration and parse faults keep their fixed wording.
    pub fn in_stage(self, stage: &str) -> Self {
        match self {
            AppError::Llm(msg) => AppError::Llm(format!("{stage} failed: {msg}")),
            other => other,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Validation(msg) => tracing::debug!("Rejected request: {msg}"),
            AppError::ContextUnset => tracing::warn!("{self}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            other => tracing::error!("{other}"),
        }

        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}
