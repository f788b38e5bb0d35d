//! Email content extraction: headers, first HTML body part, HTML → plain text.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use scraper::Html;
use thiserror::Error;

use crate::google::gmail::{GmailMessage, MessagePart};

/// Body text handed to the LLM is cut to this many characters.
pub const MAX_BODY_CHARS: usize = 4000;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("invalid base64 body: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// The parts of an email the classifier reads.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailContent {
    pub subject: String,
    pub sender: String,
    pub text_body: String,
}

impl EmailContent {
    pub fn from_message(message: &GmailMessage) -> Result<Self, EmailError> {
        let payload = &message.payload;
        let html = match body_data(payload) {
            Some(data) => decode_body(data)?,
            None => String::new(),
        };

        Ok(Self {
            subject: header(payload, "subject").unwrap_or_default().to_string(),
            sender: header(payload, "from").unwrap_or_default().to_string(),
            text_body: truncate_chars(&html_to_text(&html), MAX_BODY_CHARS),
        })
    }
}

/// Case-insensitive header lookup on the top-level payload.
pub fn header<'a>(payload: &'a MessagePart, name: &str) -> Option<&'a str> {
    payload
        .headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}

/// Multipart messages use their first `text/html` part (depth-first);
/// anything else falls back to the payload's own body.
fn body_data(payload: &MessagePart) -> Option<&str> {
    find_html_part(&payload.parts)
        .and_then(|part| part.body.data.as_deref())
        .or(payload.body.data.as_deref())
}

fn find_html_part(parts: &[MessagePart]) -> Option<&MessagePart> {
    parts.iter().find_map(|part| {
        if part.mime_type.eq_ignore_ascii_case("text/html") {
            Some(part)
        } else {
            find_html_part(&part.parts)
        }
    })
}

/// Gmail bodies are URL-safe base64 with optional padding.
fn decode_body(data: &str) -> Result<String, EmailError> {
    let bytes = URL_SAFE_NO_PAD.decode(data.trim().trim_end_matches('='))?;
    Ok(String::from_utf8(bytes)?)
}

/// Visible text nodes, trimmed, one per line. Script and style contents are dropped.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|el| el.name()))
            .is_some_and(|name| matches!(name, "script" | "style"));
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed);
        }
    }

    lines.join("\n")
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
