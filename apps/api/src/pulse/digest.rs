//! "Team & Beyond Pulse": a short digest of internal news for the user's team and area.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::context::UserContext;
use crate::errors::AppError;
use crate::llm_client::prompts::{fill, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{complete, extract_json, Completion, LlmError};
use crate::pulse::prompts::PULSE_PROMPT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseItem {
    pub subject: String,
    pub update: String,
    #[serde(default)]
    pub link: String,
}

/// Best-effort digest. An unset context or any LLM/parse failure yields an
/// empty list; only a missing LLM configuration is an error.
pub async fn generate_pulse(
    llm: &dyn Completion,
    context: &UserContext,
    timeout: Duration,
) -> Result<Vec<PulseItem>, AppError> {
    if !llm.is_configured() {
        return Err(LlmError::NotConfigured.into());
    }
    if !context.is_set() {
        return Ok(Vec::new());
    }

    info!("Generating pulse updates...");
    let prompt = fill(
        PULSE_PROMPT,
        &[
            ("team", context.team()),
            ("area", context.area()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    );

    let result = complete(llm, &prompt, timeout)
        .await
        .and_then(|raw| extract_json::<Vec<PulseItem>>(&raw));

    match result {
        Ok(items) => Ok(items),
        Err(e) => {
            error!("Error in pulse generation: {e}");
            Ok(Vec::new())
        }
    }
}
