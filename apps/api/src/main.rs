mod chat;
mod config;
mod context;
mod errors;
mod google;
mod inbox;
mod llm_client;
mod pulse;
mod recommendation;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat::session_store::LruSessionStore;
use crate::config::Config;
use crate::google::GoogleClient;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting FRIDAY API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_api_base.clone())?;
    if config.gemini_api_key.is_some() {
        info!("LLM client initialized (model: {})", llm_client::gemini::MODEL);
    } else {
        warn!("GEMINI_API_KEY not set; LLM-backed endpoints will report a configuration error");
    }

    // Initialize Google client (Gmail + Calendar)
    let google = match &config.google_access_token {
        Some(token) => Some(GoogleClient::new(
            token.clone(),
            config.gmail_api_base.clone(),
            config.calendar_api_base.clone(),
        )?),
        None => {
            warn!("GOOGLE_ACCESS_TOKEN not set; Gmail and Calendar endpoints are disabled");
            None
        }
    };

    let sessions = LruSessionStore::new(config.chat_session_capacity, config.chat_history_limit);
    info!(
        "Chat session store: {} sessions, {} turns each",
        config.chat_session_capacity, config.chat_history_limit
    );

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        google,
        sessions: Arc::new(sessions),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
