//! Axum route handlers for the Recommendation API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::recommendation::pipeline::generate_recommendations;
use crate::recommendation::synthesizer::RecommendationSet;
use crate::state::AppState;

/// GET /api/recommendations
///
/// Runs the four-stage pipeline. Any fault becomes a 500 with `{"detail": ...}`.
pub async fn handle_get_recommendations(
    State(state): State<AppState>,
) -> Result<Json<RecommendationSet>, AppError> {
    let recommendations = generate_recommendations(
        state.llm.as_ref(),
        &state.config.context_file,
        state.config.llm_timeout,
    )
    .await?;

    Ok(Json(recommendations))
}
