pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers::handle_chat;
use crate::context::handlers::handle_get_context;
use crate::google::handlers::{handle_calendar_today, handle_gmail_today};
use crate::pulse::handlers::handle_get_pulse;
use crate::recommendation::handlers::handle_get_recommendations;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/context", get(handle_get_context))
        .route("/api/recommendations", get(handle_get_recommendations))
        .route("/api/gmail/today", get(handle_gmail_today))
        .route("/api/calendar/today", get(handle_calendar_today))
        .route("/api/pulse", get(handle_get_pulse))
        .route("/api/friday/chat", post(handle_chat))
        .with_state(state)
}
