use std::sync::Arc;

use crate::chat::session_store::SessionStore;
use crate::config::Config;
use crate::google::GoogleClient;
use crate::llm_client::Completion;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Gemini in production; scripted doubles in tests.
    pub llm: Arc<dyn Completion>,
    /// `None` when `GOOGLE_ACCESS_TOKEN` is unset.
    pub google: Option<GoogleClient>,
    pub sessions: Arc<dyn SessionStore>,
    pub config: Config,
}
