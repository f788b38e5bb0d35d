//! Inbox triage — one LLM classification per email.
//!
//! Failures are isolated per email: a message that cannot be decoded,
//! classified or parsed is logged and skipped, and the batch carries on.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::errors::AppError;
use crate::google::gmail::GmailMessage;
use crate::inbox::email::{header, EmailContent, EmailError};
use crate::inbox::prompts::EMAIL_TRIAGE_PROMPT;
use crate::llm_client::prompts::{fill, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{complete, extract_json, Completion, LlmError};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Raw LLM verdict for one email.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailAnalysis {
    pub classification: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub task: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamUpdate {
    pub subject: String,
    pub update: String,
    pub link: String,
}

/// Response body of `GET /api/gmail/today`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InboxSummary {
    pub todos: Vec<Todo>,
    pub team_updates: Vec<TeamUpdate>,
}

#[derive(Debug, Clone, PartialEq)]
enum Triage {
    Todo(Todo),
    TeamUpdate(TeamUpdate),
    Ignored,
}

#[derive(Debug, Error)]
enum TriageError {
    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

// ────────────────────────────────────────────────────────────────────────────
// Batch
// ────────────────────────────────────────────────────────────────────────────

/// Classifies `messages` with at most `concurrency` LLM calls in flight.
/// Output order follows input order.
pub async fn analyze_emails(
    llm: &dyn Completion,
    messages: &[GmailMessage],
    concurrency: usize,
    timeout: Duration,
) -> Result<InboxSummary, AppError> {
    if !llm.is_configured() {
        return Err(LlmError::NotConfigured.into());
    }

    info!("Found {} emails to analyze.", messages.len());
    // Built eagerly: a borrowing `async move` inside `map` makes the handler future non-Send.
    let pending: Vec<_> = messages
        .iter()
        .map(|message| {
            let subject = header(&message.payload, "subject").unwrap_or_default();
            let analysis = analyze_email(llm, message, timeout);
            async move {
                match analysis.await {
                    Ok(triage) => Some(triage),
                    Err(e) => {
                        error!("Could not process email: {subject}. Error: {e}");
                        None
                    }
                }
            }
        })
        .collect();

    let outcomes: Vec<Option<Triage>> = stream::iter(pending)
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut summary = InboxSummary::default();
    for triage in outcomes.into_iter().flatten() {
        match triage {
            Triage::Todo(todo) => summary.todos.push(todo),
            Triage::TeamUpdate(update) => summary.team_updates.push(update),
            Triage::Ignored => {}
        }
    }

    info!(
        "Inbox summary: {} to-dos, {} team updates",
        summary.todos.len(),
        summary.team_updates.len()
    );
    Ok(summary)
}

// ────────────────────────────────────────────────────────────────────────────
// Single email
// ────────────────────────────────────────────────────────────────────────────

async fn analyze_email(
    llm: &dyn Completion,
    message: &GmailMessage,
    timeout: Duration,
) -> Result<Triage, TriageError> {
    let email = EmailContent::from_message(message)?;
    info!(
        "Analyzing email from {} with subject '{}'...",
        email.sender, email.subject
    );

    let prompt = fill(
        EMAIL_TRIAGE_PROMPT,
        &[
            ("sender", email.sender.as_str()),
            ("subject", email.subject.as_str()),
            ("body", email.text_body.as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    );
    let raw = complete(llm, &prompt, timeout).await?;
    let analysis: EmailAnalysis = extract_json(&raw)?;

    Ok(triage(analysis, email.subject))
}

fn triage(analysis: EmailAnalysis, subject: String) -> Triage {
    let link = analysis.link.unwrap_or_default();
    let summary = analysis.summary.filter(|s| !s.trim().is_empty());

    match analysis.classification.trim().to_ascii_lowercase().as_str() {
        "to-do" | "todo" => Triage::Todo(Todo {
            task: summary.unwrap_or(subject),
            link,
        }),
        "team_update" => Triage::TeamUpdate(TeamUpdate {
            subject,
            update: summary.unwrap_or_else(|| "No summary available.".to_string()),
            link,
        }),
        _ => Triage::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::google::gmail::{Header, MessagePart, PartBody};
    use crate::llm_client::testing::ScriptedLlm;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    fn email(subject: &str, html_body: &str) -> GmailMessage {
        raw_email(subject, URL_SAFE_NO_PAD.encode(html_body))
    }

    fn raw_email(subject: &str, data: String) -> GmailMessage {
        GmailMessage {
            id: subject.to_string(),
            payload: MessagePart {
                mime_type: "text/html".into(),
                headers: vec![
                    Header {
                        name: "Subject".into(),
                        value: subject.into(),
                    },
                    Header {
                        name: "From".into(),
                        value: "boss@example.com".into(),
                    },
                ],
                body: PartBody { data: Some(data) },
                parts: vec![],
            },
        }
    }

    fn analysis(classification: &str, summary: Option<&str>, link: Option<&str>) -> EmailAnalysis {
        EmailAnalysis {
            classification: classification.into(),
            summary: summary.map(str::to_string),
            link: link.map(str::to_string),
        }
    }

    #[test]
    fn test_triage_todo_uses_summary_and_link() {
        let result = triage(
            analysis("to-do", Some("Review the design doc."), Some("https://go/doc")),
            "Design review".into(),
        );
        assert_eq!(
            result,
            Triage::Todo(Todo {
                task: "Review the design doc.".into(),
                link: "https://go/doc".into(),
            })
        );
    }

    #[test]
    fn test_triage_todo_falls_back_to_subject() {
        let result = triage(analysis("to-do", None, None), "Sign the form".into());
        assert_eq!(
            result,
            Triage::Todo(Todo {
                task: "Sign the form".into(),
                link: String::new(),
            })
        );
    }

    #[test]
    fn test_triage_team_update_default_summary() {
        let result = triage(analysis("team_update", None, None), "Weekly notes".into());
        assert_eq!(
            result,
            Triage::TeamUpdate(TeamUpdate {
                subject: "Weekly notes".into(),
                update: "No summary available.".into(),
                link: String::new(),
            })
        );
    }

    #[test]
    fn test_triage_none_is_ignored() {
        assert_eq!(triage(analysis("none", None, None), "Ad".into()), Triage::Ignored);
    }

    #[test]
    fn test_analysis_accepts_null_fields() {
        let parsed: EmailAnalysis =
            serde_json::from_str(r#"{"classification": "none", "summary": null, "link": null}"#)
                .unwrap();
        assert_eq!(parsed.classification, "none");
        assert!(parsed.summary.is_none());
    }

    #[tokio::test]
    async fn test_failing_email_is_skipped_and_batch_continues() {
        let llm = ScriptedLlm::new()
            .on(
                "Subject: Expense report",
                r#"{"classification": "to-do", "summary": "File your expenses.", "link": "https://go/expenses"}"#,
            )
            .on(
                "Subject: Launch notes",
                "```json\n{\"classification\": \"team_update\", \"summary\": \"v2 shipped.\", \"link\": null}\n```",
            );
        let messages = vec![
            email("Expense report", "<p>Please file by Friday.</p>"),
            raw_email("Broken body", "@@@ not base64 @@@".into()),
            email("Launch notes", "<p>We shipped v2.</p>"),
        ];

        let summary = analyze_emails(&llm, &messages, 4, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(
            summary,
            InboxSummary {
                todos: vec![Todo {
                    task: "File your expenses.".into(),
                    link: "https://go/expenses".into(),
                }],
                team_updates: vec![TeamUpdate {
                    subject: "Launch notes".into(),
                    update: "v2 shipped.".into(),
                    link: String::new(),
                }],
            }
        );
        assert_eq!(llm.calls(), 2);
    }

    #[tokio::test]
    async fn test_llm_failure_and_bad_json_are_isolated() {
        let llm = ScriptedLlm::new()
            .fail_on("Subject: First", "overloaded")
            .on("Subject: Second", "not json at all")
            .on(
                "Subject: Third",
                r#"{"classification": "to-do", "summary": "Reply to HR.", "link": ""}"#,
            );
        let messages = vec![
            email("First", "<p>a</p>"),
            email("Second", "<p>b</p>"),
            email("Third", "<p>c</p>"),
        ];

        let summary = analyze_emails(&llm, &messages, 1, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(summary.todos.len(), 1);
        assert_eq!(summary.todos[0].task, "Reply to HR.");
        assert!(summary.team_updates.is_empty());
        assert_eq!(llm.calls(), 3);
    }

    #[tokio::test]
    async fn test_prompt_carries_sender_subject_and_text_body() {
        let llm = ScriptedLlm::new().on("Subject: Hello", r#"{"classification": "none"}"#);
        analyze_emails(&llm, &[email("Hello", "<p>Body <b>text</b></p>")], 4, Duration::from_secs(5))
            .await
            .unwrap();

        let prompt = llm.conversations()[0][0].text();
        assert!(prompt.contains("From: boss@example.com"));
        assert!(prompt.contains("Body Snippet: Body\ntext"));
    }

    #[tokio::test]
    async fn test_unconfigured_llm_fails_whole_request() {
        let llm = ScriptedLlm::unconfigured();
        let err = analyze_emails(&llm, &[email("Hello", "<p>x</p>")], 4, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
