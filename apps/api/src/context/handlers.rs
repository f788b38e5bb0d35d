use axum::{extract::State, Json};

use crate::context::loader::{load_context, UserContext};
use crate::state::AppState;

/// GET /api/context
/// Returns the user profile document as currently written on disk.
pub async fn handle_get_context(State(state): State<AppState>) -> Json<UserContext> {
    Json(load_context(&state.config.context_file).await)
}
