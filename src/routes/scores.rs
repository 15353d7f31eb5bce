use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{error, info};

use crate::app::AppState;
use crate::error::FantasyError;

pub async fn get_cumulative_scores(
    Extension(state): Extension<AppState>,
    Path(team_id): Path<i64>,
) -> Result<impl IntoResponse, FantasyError> {
    let scores = state.scores.get_cumulative_scores(team_id).await?;
    Ok((StatusCode::OK, Json(scores)))
}

/**
 * GET a team's stored score for one jornada. 404 when it was never computed.
 */
pub async fn get_team_score(
    Extension(state): Extension<AppState>,
    Path((team_id, jornada_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, FantasyError> {
    match state.scores.get_team_score(team_id, jornada_id).await? {
        Some(score) => Ok((StatusCode::OK, Json(score))),
        None => Err(FantasyError::NotFound { entity: "team score", id: jornada_id }),
    }
}

/**
 * POST request to rebuild every team score from the stats feed.
 */
pub async fn recompute_all(Extension(state): Extension<AppState>) -> impl IntoResponse {
    info!("Recomputing all scores.");

    match state.scores.recompute_all().await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            error!("Sweep could not start: {}", e);
            e.into_response()
        }
    }
}
