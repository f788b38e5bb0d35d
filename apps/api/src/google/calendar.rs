//! Calendar: today's events from the primary calendar.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{GoogleClient, GoogleError};

const SERVICE: &str = "Calendar";

#[derive(Debug, Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    summary: Option<String>,
    hangout_link: Option<String>,
    #[serde(default)]
    start: EventTime,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventTime {
    date_time: Option<String>,
    date: Option<String>,
}

/// Event as exposed by `GET /api/calendar/today`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub link: String,
    /// RFC 3339 timestamp, or a bare date for all-day events.
    pub start_time: String,
}

impl From<RawEvent> for CalendarEvent {
    fn from(event: RawEvent) -> Self {
        Self {
            summary: event.summary.unwrap_or_else(|| "No Title".to_string()),
            link: event.hangout_link.unwrap_or_default(),
            start_time: event.start.date_time.or(event.start.date).unwrap_or_default(),
        }
    }
}

impl GoogleClient {
    /// Events on the current UTC day.
    pub async fn todays_events(&self) -> Result<Vec<CalendarEvent>, GoogleError> {
        self.events_on(Utc::now().date_naive()).await
    }

    pub async fn events_on(&self, day: NaiveDate) -> Result<Vec<CalendarEvent>, GoogleError> {
        let url = format!("{}/calendar/v3/calendars/primary/events", self.calendar_base);
        let params = [
            ("timeMin", format!("{day}T00:00:00Z")),
            ("timeMax", format!("{day}T23:59:59.999999Z")),
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
        ];

        let list: EventList = self.get_json(SERVICE, &url, &params).await?;
        Ok(list.items.into_iter().map(CalendarEvent::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_events_on_maps_timed_and_all_day_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calendar/v3/calendars/primary/events"))
            .and(query_param("timeMin", "2026-10-19T00:00:00Z"))
            .and(query_param("timeMax", "2026-10-19T23:59:59.999999Z"))
            .and(query_param("singleEvents", "true"))
            .and(query_param("orderBy", "startTime"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    {
                        "summary": "Standup",
                        "hangoutLink": "https://meet.google.com/abc",
                        "start": {"dateTime": "2026-10-19T09:00:00-07:00"}
                    },
                    {"start": {"date": "2026-10-19"}}
                ]
            })))
            .mount(&server)
            .await;

        let client = GoogleClient::new("token", server.uri(), server.uri()).unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let events = client.events_on(day).await.unwrap();

        assert_eq!(
            events,
            vec![
                CalendarEvent {
                    summary: "Standup".into(),
                    link: "https://meet.google.com/abc".into(),
                    start_time: "2026-10-19T09:00:00-07:00".into(),
                },
                CalendarEvent {
                    summary: "No Title".into(),
                    link: String::new(),
                    start_time: "2026-10-19".into(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_server_error_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let client = GoogleClient::new("token", server.uri(), server.uri()).unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let err = client.events_on(day).await.unwrap_err();
        assert!(matches!(err, GoogleError::Api { status: 503, .. }));
    }
}
