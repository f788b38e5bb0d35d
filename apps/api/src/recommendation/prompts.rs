// All LLM prompt constants for the Recommendation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Closing instruction for every topic generator. Replace `{count}` before sending.
pub const COMMA_LIST_INSTRUCTION: &str = "\
Respond with a comma-separated list of exactly {count} items and nothing else. \
Each item is a short topic title (a few words). \
Do NOT number the items, do NOT use markdown, and do NOT add explanations.";

/// Role-specific upskilling topics.
/// Replace: {role}, {team}, {area}, {list_instruction}
pub const SKILL_TOPICS_PROMPT: &str = r#"You are FRIDAY, an expert career development partner at Google. Your task is to identify upskilling topics for a Google employee based on their professional role and team.

User Context:
- Role: {role}
- Team: {team}
- Area: {area}

Identify the most critical skills or knowledge areas someone in this position should master, and name one specific, actionable learning topic for each: a particular technology, design pattern, or practice they could start exploring immediately.

{list_instruction}"#;

/// Industry trend topics.
/// Replace: {role}, {team}, {area}, {list_instruction}
pub const TREND_TOPICS_PROMPT: &str = r#"You are FRIDAY, a technology trend analyst for Google employees.

User Context:
- Role: {role}
- Team: {team}
- Area: {area}

Based on your knowledge of Google and the broader tech industry, identify major trending fields (e.g. Generative AI, Quantum Computing) and, for each, one specific and accessible sub-topic or technology that a person in the user's area could learn about.

{list_instruction}"#;

/// Internal event ideas.
/// Replace: {role}, {team}, {area}, {list_instruction}
pub const EVENT_IDEAS_PROMPT: &str = r#"You are FRIDAY, an internal events curator for Google employees. Your task is to suggest relevant internal events, workshops, and speaker series.

User Context:
- Role: {role}
- Team: {team}
- Area: {area}

Mix professional development events (workshops directly related to their work) with community and cross-functional events (tech talks, speaker series, social meetups). Each item should be a plausible event title for a real Google employee.

{list_instruction}"#;

/// Final synthesis into the RecommendationSet JSON object.
/// Replace: {context_json}, {skills_json}, {trends_json}, {events_json}, {json_only}
pub const SYNTHESIS_PROMPT: &str = r#"You are a personalized recommendation engine for Google employees.
Your task is to create a structured JSON feed of career opportunities.
Use the provided user context and the generated topic lists to create a final, user-friendly recommendation object.
For each recommendation, provide a brief, compelling reason why it is relevant to the user.

User Context: {context_json}

Identified Role-Specific Skills: {skills_json}
Identified Trending Topics: {trends_json}
Identified Event Types: {events_json}

Generate a JSON object with exactly three keys: "role_specific_upskilling", "trending_topics", and "internal_events".
Each key must contain a list of JSON objects, where each object has "recommendation" and "reason" string fields.
Example for a single item: {"recommendation": "Advanced Kubernetes Workshop", "reason": "Deepens your expertise in cloud infrastructure, which is crucial for your role on the SRE team."}

{json_only}"#;
