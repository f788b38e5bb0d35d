//! Topic generators — skills, trends and events.
//!
//! Each generator is one LLM call whose answer is a comma-separated list.
//! The three are independent pure functions of `UserContext`.

use std::time::Duration;

use tracing::{debug, info};

use crate::context::UserContext;
use crate::errors::AppError;
use crate::llm_client::prompts::fill;
use crate::llm_client::{complete, Completion};
use crate::recommendation::prompts::{
    COMMA_LIST_INSTRUCTION, EVENT_IDEAS_PROMPT, SKILL_TOPICS_PROMPT, TREND_TOPICS_PROMPT,
};

/// Ordered free-text topics parsed from one generator response.
pub type TopicList = Vec<String>;

/// The three generator stages that feed the synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicKind {
    Skills,
    Trends,
    Events,
}

impl TopicKind {
    /// How many items the prompt asks for.
    pub fn count(&self) -> usize {
        match self {
            TopicKind::Skills => 5,
            TopicKind::Trends => 3,
            TopicKind::Events => 4,
        }
    }

    pub fn stage_name(&self) -> &'static str {
        match self {
            TopicKind::Skills => "Skill topic generation",
            TopicKind::Trends => "Trend generation",
            TopicKind::Events => "Event generation",
        }
    }

    fn template(&self) -> &'static str {
        match self {
            TopicKind::Skills => SKILL_TOPICS_PROMPT,
            TopicKind::Trends => TREND_TOPICS_PROMPT,
            TopicKind::Events => EVENT_IDEAS_PROMPT,
        }
    }

    pub fn prompt(&self, context: &UserContext) -> String {
        let list_instruction = COMMA_LIST_INSTRUCTION.replace("{count}", &self.count().to_string());
        fill(
            self.template(),
            &[
                ("role", context.role()),
                ("team", context.team()),
                ("area", context.area()),
                ("list_instruction", list_instruction.as_str()),
            ],
        )
    }
}

/// Runs one generator stage.
pub async fn generate_topics(
    kind: TopicKind,
    llm: &dyn Completion,
    context: &UserContext,
    timeout: Duration,
) -> Result<TopicList, AppError> {
    info!("{}: requesting {} topics", kind.stage_name(), kind.count());
    let raw = complete(llm, &kind.prompt(context), timeout)
        .await
        .map_err(|e| AppError::from(e).in_stage(kind.stage_name()))?;

    let topics = split_topics(&raw);
    debug!("{}: parsed {} topics", kind.stage_name(), topics.len());
    Ok(topics)
}

/// Splits a raw comma-separated answer into trimmed, non-empty topics.
///
/// Lossy: a topic that itself contains a comma comes back as two entries.
/// Output that ignores the list instruction (a paragraph, say) is kept as-is
/// in whatever pieces the commas produce.
pub fn split_topics(raw: &str) -> TopicList {
    raw.split(',')
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
        .map(str::to_string)
        .collect()
}
