use axum::{extract::State, Json};

use crate::context::load_context;
use crate::errors::AppError;
use crate::pulse::digest::{generate_pulse, PulseItem};
use crate::state::AppState;

/// GET /api/pulse
pub async fn handle_get_pulse(
    State(state): State<AppState>,
) -> Result<Json<Vec<PulseItem>>, AppError> {
    let context = load_context(&state.config.context_file).await;
    let items = generate_pulse(state.llm.as_ref(), &context, state.config.llm_timeout).await?;
    Ok(Json(items))
}
