use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use tracing::{error, info};

use crate::app::AppState;

/**
 * GET the player catalog, grouped by position.
 */
pub async fn get_players(Extension(state): Extension<AppState>) -> impl IntoResponse {
    info!("Fetching players.");

    match state.catalog.list_by_position().await {
        Ok(players) => (StatusCode::OK, Json(players)).into_response(),
        Err(e) => {
            error!("Failed to list players: {}", e);
            e.into_response()
        }
    }
}
