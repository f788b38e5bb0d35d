//! Structured payload extraction from decorated LLM text.
//!
//! Contract: trim, remove a Markdown code fence if the payload is wrapped in one
//! (or take the first fenced block when the model adds prose around it), then
//! parse the remainder as JSON. Any failure is a `LlmError::Parse`.

use serde::de::DeserializeOwned;

use super::LlmError;

const FENCE: &str = "```";

/// Parses `T` out of raw model output.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    serde_json::from_str(strip_code_fences(text)).map_err(LlmError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// Bare JSON is returned untouched (trimmed), so stripping is idempotent.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if text.starts_with('{') || text.starts_with('[') {
        return text;
    }

    let Some(open) = text.find(FENCE) else {
        return text;
    };

    let body = &text[open + FENCE.len()..];
    let body = body
        .strip_prefix("json")
        .or_else(|| body.strip_prefix("JSON"))
        .unwrap_or(body);

    match body.find(FENCE) {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}
