//! Gmail: today's unread messages, fetched in full.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{GoogleClient, GoogleError};

const SERVICE: &str = "Gmail";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageList {
    #[serde(default)]
    messages: Vec<MessageRef>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageRef {
    id: String,
}

/// A Gmail message as returned by `users.messages.get` (format=full).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GmailMessage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub payload: MessagePart,
}

/// One MIME part. The top-level payload is itself a part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub body: PartBody,
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Body data is URL-safe base64.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartBody {
    pub data: Option<String>,
}

impl GoogleClient {
    /// Unread messages received today (local date).
    pub async fn todays_unread_messages(&self) -> Result<Vec<GmailMessage>, GoogleError> {
        self.unread_messages_since(Local::now().date_naive()).await
    }

    pub async fn unread_messages_since(
        &self,
        day: NaiveDate,
    ) -> Result<Vec<GmailMessage>, GoogleError> {
        let query = format!("is:unread after:{}", day.format("%Y/%m/%d"));
        let list_url = format!("{}/gmail/v1/users/me/messages", self.gmail_base);

        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut params = vec![("q", query.clone())];
            if let Some(token) = &page_token {
                params.push(("pageToken", token.clone()));
            }

            let page: MessageList = self.get_json(SERVICE, &list_url, &params).await?;
            ids.extend(page.messages.into_iter().map(|m| m.id));

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        if ids.is_empty() {
            info!("No new messages found.");
            return Ok(Vec::new());
        }

        let mut messages = Vec::with_capacity(ids.len());
        for id in ids {
            let url = format!("{list_url}/{id}");
            let message: GmailMessage = self
                .get_json(SERVICE, &url, &[("format", "full".to_string())])
                .await?;
            messages.push(message);
        }

        info!("Fetched {} unread messages since {day}", messages.len());
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GoogleClient {
        GoogleClient::new("token-123", server.uri(), server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_lists_then_fetches_each_message() {
        let server = MockServer::start().await;
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        Mock::given(method("GET"))
            .and(path("/gmail/v1/users/me/messages"))
            .and(query_param("q", "is:unread after:2026/10/19"))
            .and(header("authorization", "Bearer token-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "messages": [{"id": "m1", "threadId": "t1"}, {"id": "m2", "threadId": "t2"}]
            })))
            .mount(&server)
            .await;

        for id in ["m1", "m2"] {
            Mock::given(method("GET"))
                .and(path(format!("/gmail/v1/users/me/messages/{id}")))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "id": id,
                    "payload": {
                        "mimeType": "text/html",
                        "headers": [{"name": "Subject", "value": format!("subject {id}")}],
                        "body": {"size": 4, "data": "PGI-PC9iPg"}
                    }
                })))
                .expect(1)
                .mount(&server)
                .await;
        }

        let messages = client(&server).unread_messages_since(day).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id, "m1");
        assert_eq!(messages[1].payload.headers[0].value, "subject m2");
    }

    #[tokio::test]
    async fn test_empty_inbox_returns_no_messages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gmail/v1/users/me/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "resultSizeEstimate": 0
            })))
            .mount(&server)
            .await;

        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let messages = client(&server).unread_messages_since(day).await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_api_error_carries_google_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gmail/v1/users/me/messages"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"code": 401, "message": "Invalid Credentials", "status": "UNAUTHENTICATED"}
            })))
            .mount(&server)
            .await;

        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let err = client(&server).unread_messages_since(day).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Gmail API error (status 401): Invalid Credentials"
        );
    }
}
