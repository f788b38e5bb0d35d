// Shared prompt fragments and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Closing instruction for every prompt whose answer is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Identity line shared by the user-facing assistants.
pub const FRIDAY_PERSONA: &str = "You are FRIDAY, an expert AI assistant for Google employees.";

/// Fills `{key}` placeholders in a prompt template in a single pass.
/// Inserted values are never rescanned; unknown placeholders stay as written.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut prompt = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        prompt.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let known = after.find('}').and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, end))
        });

        match known {
            Some((value, end)) => {
                prompt.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                prompt.push('{');
                rest = after;
            }
        }
    }

    prompt.push_str(rest);
    prompt
}
