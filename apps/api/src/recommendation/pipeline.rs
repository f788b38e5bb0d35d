//! Recommendation pipeline — orchestrates the four-stage synthesis.
//!
//! Flow: configuration check → load_context → sentinel check →
//!       (skills ‖ trends ‖ events) → synthesize → return.
//!
//! The three generators share nothing but the read-only context, so they run
//! concurrently and are joined fail-fast before synthesis. No partial result
//! is ever returned.

use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::context::{load_context, UserContext};
use crate::errors::AppError;
use crate::llm_client::{Completion, LlmError};
use crate::recommendation::synthesizer::{synthesize, RecommendationSet};
use crate::recommendation::topics::{generate_topics, TopicKind};

/// Runs the full pipeline against the context document at `context_file`.
pub async fn generate_recommendations(
    llm: &dyn Completion,
    context_file: &Path,
    timeout: Duration,
) -> Result<RecommendationSet, AppError> {
    if !llm.is_configured() {
        return Err(LlmError::NotConfigured.into());
    }

    let context = load_context(context_file).await;
    if !context.is_set() {
        return Err(AppError::ContextUnset);
    }

    recommend_for(llm, &context, timeout).await
}

/// Stages 2–4 for an already-loaded, configured context.
pub async fn recommend_for(
    llm: &dyn Completion,
    context: &UserContext,
    timeout: Duration,
) -> Result<RecommendationSet, AppError> {
    info!("Generating recommendations for {}", context.name());

    let (skills, trends, events) = tokio::try_join!(
        generate_topics(TopicKind::Skills, llm, context, timeout),
        generate_topics(TopicKind::Trends, llm, context, timeout),
        generate_topics(TopicKind::Events, llm, context, timeout),
    )?;

    synthesize(llm, context, &skills, &trends, &events, timeout).await
}
