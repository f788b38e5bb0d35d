// Email triage prompt.

/// Replace: {sender}, {subject}, {body}, {json_only}
pub const EMAIL_TRIAGE_PROMPT: &str = r#"Analyze the content of the following email and classify it.

From: {sender}
Subject: {subject}
Body Snippet: {body}

1. Classification: Is this email primarily a "to-do" (requiring a direct action from the recipient), a "team_update" (a general announcement, meeting notes, or status update), or "none"?
2. Summary: If it is a "to-do" or "team_update", provide a concise one-sentence summary.
3. Link: Extract the single most relevant hyperlink from the email body, if one exists.

Respond with a single JSON object with the keys "classification", "summary", and "link". Use null for a missing summary or link.

{json_only}"#;
