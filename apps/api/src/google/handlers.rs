//! Axum route handlers for the Gmail and Calendar endpoints.

use axum::{extract::State, Json};
use tracing::warn;

use crate::errors::AppError;
use crate::google::calendar::CalendarEvent;
use crate::google::GoogleClient;
use crate::inbox::classifier::{analyze_emails, InboxSummary};
use crate::llm_client::LlmError;
use crate::state::AppState;

fn google_client<'a>(state: &'a AppState, service: &str) -> Result<&'a GoogleClient, AppError> {
    state.google.as_ref().ok_or_else(|| {
        AppError::Configuration(format!(
            "Failed to connect to {service} service: GOOGLE_ACCESS_TOKEN is not set"
        ))
    })
}

/// GET /api/gmail/today
/// Triage of today's unread messages. Gmail failures surface as 502.
pub async fn handle_gmail_today(
    State(state): State<AppState>,
) -> Result<Json<InboxSummary>, AppError> {
    let google = google_client(&state, "Gmail")?;
    if !state.llm.is_configured() {
        return Err(LlmError::NotConfigured.into());
    }
    let messages = google.todays_unread_messages().await?;

    let summary = analyze_emails(
        state.llm.as_ref(),
        &messages,
        state.config.email_concurrency,
        state.config.llm_timeout,
    )
    .await?;
    Ok(Json(summary))
}

/// GET /api/calendar/today
/// A Calendar failure is logged and reported as "no events".
pub async fn handle_calendar_today(
    State(state): State<AppState>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let google = google_client(&state, "Calendar")?;
    match google.todays_events().await {
        Ok(events) => Ok(Json(events)),
        Err(e) => {
            warn!("Could not fetch calendar events: {e}");
            Ok(Json(Vec::new()))
        }
    }
}
