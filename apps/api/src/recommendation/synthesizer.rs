//! Synthesizer — folds the three topic lists into the final RecommendationSet.
//!
//! All or nothing: an unparseable answer discards the topic lists computed
//! upstream and surfaces a parse fault. No retry.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::context::UserContext;
use crate::errors::AppError;
use crate::llm_client::prompts::{fill, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{complete, extract_json, Completion};
use crate::recommendation::prompts::SYNTHESIS_PROMPT;
use crate::recommendation::topics::TopicList;

const STAGE: &str = "Recommendation synthesis";

/// One suggested item and why it matters to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommendation: String,
    pub reason: String,
}

/// Final pipeline output. Always serializes with exactly these three keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub role_specific_upskilling: Vec<Recommendation>,
    pub trending_topics: Vec<Recommendation>,
    pub internal_events: Vec<Recommendation>,
}

/// Issues the synthesis call and parses its JSON answer.
pub async fn synthesize(
    llm: &dyn Completion,
    context: &UserContext,
    skills: &TopicList,
    trends: &TopicList,
    events: &TopicList,
    timeout: Duration,
) -> Result<RecommendationSet, AppError> {
    let prompt = build_synthesis_prompt(context, skills, trends, events)?;

    info!(
        "{STAGE}: combining {} skills, {} trends, {} events",
        skills.len(),
        trends.len(),
        events.len()
    );
    let raw = complete(llm, &prompt, timeout)
        .await
        .map_err(|e| AppError::from(e).in_stage(STAGE))?;

    let set: RecommendationSet = extract_json(&raw)?;
    info!(
        "{STAGE}: produced {}/{}/{} recommendations",
        set.role_specific_upskilling.len(),
        set.trending_topics.len(),
        set.internal_events.len()
    );
    Ok(set)
}

/// Builds the synthesis prompt by filling the template with serialized inputs.
fn build_synthesis_prompt(
    context: &UserContext,
    skills: &TopicList,
    trends: &TopicList,
    events: &TopicList,
) -> Result<String, AppError> {
    let context_json = to_json(context)?;
    let skills_json = to_json(skills)?;
    let trends_json = to_json(trends)?;
    let events_json = to_json(events)?;

    Ok(fill(
        SYNTHESIS_PROMPT,
        &[
            ("context_json", context_json.as_str()),
            ("skills_json", skills_json.as_str()),
            ("trends_json", trends_json.as_str()),
            ("events_json", events_json.as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    ))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string(value).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Failed to serialize synthesis input: {e}"))
    })
}
