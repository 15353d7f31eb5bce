use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tracing::{error, info};

use crate::app::AppState;
use crate::dto::request_team_dto::{AddPlayer, CreateTeam, SwapPlayers};
use crate::error::FantasyError;
use crate::services::roster::TeamRoster;

/// Refreshes the current jornada score. The roster change is already
/// committed, so a failure here is logged and not reported to the caller.
async fn refresh_score(state: &AppState, team_id: i64) {
    if let Err(e) = state.scores.roster_changed(team_id, Utc::now().date_naive()).await {
        error!("Failed to refresh score of team {}: {}", team_id, e);
    }
}

/**
 * POST request to create a new, empty team for a user.
 */
pub async fn create_team(
    Extension(state): Extension<AppState>,
    Json(payload): Json<CreateTeam>,
) -> impl IntoResponse {
    match state.rosters.create_team(&payload.name, payload.owner_id).await {
        Ok(team) => (StatusCode::CREATED, Json(team)).into_response(),
        Err(e) => e.into_response(),
    }
}

/**
 * GET request for the team owned by a user.
 */
pub async fn get_team_by_owner(
    Extension(state): Extension<AppState>,
    Path(owner_id): Path<i64>,
) -> impl IntoResponse {
    match state.rosters.get_team_by_owner(owner_id).await {
        Ok(team) => (StatusCode::OK, Json(team)).into_response(),
        Err(e) => e.into_response(),
    }
}

/**
 * GET request for a team's players grouped by position.
 */
pub async fn get_roster(
    Extension(state): Extension<AppState>,
    Path(team_id): Path<i64>,
) -> Result<impl IntoResponse, FantasyError> {
    let view = state.rosters.get_roster(team_id).await?;
    Ok((StatusCode::OK, Json(view)))
}

pub async fn get_limits(
    Extension(state): Extension<AppState>,
    Path(team_id): Path<i64>,
) -> Result<impl IntoResponse, FantasyError> {
    let limits = state.rosters.query_limits(team_id).await?;
    Ok((StatusCode::OK, Json(limits)))
}

fn roster_response(roster: TeamRoster) -> impl IntoResponse {
    (StatusCode::OK, Json(roster.into_view()))
}

/**
 * POST request to sign a player. The field or bench slot is decided by the
 * team's current formation.
 */
pub async fn add_player(
    Extension(state): Extension<AppState>,
    Path(team_id): Path<i64>,
    Json(payload): Json<AddPlayer>,
) -> Result<impl IntoResponse, FantasyError> {
    let roster = state.rosters.add_player(team_id, payload.player_id).await?;
    info!("Player {} joined team {}", payload.player_id, team_id);
    refresh_score(&state, team_id).await;
    Ok(roster_response(roster))
}

/**
 * DELETE request to release a player and refund the price.
 */
pub async fn remove_player(
    Extension(state): Extension<AppState>,
    Path((team_id, player_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, FantasyError> {
    let roster = state.rosters.remove_player(team_id, player_id).await?;
    info!("Player {} left team {}", player_id, team_id);
    refresh_score(&state, team_id).await;
    Ok(roster_response(roster))
}

/**
 * POST request to exchange a bench player with a field player of the same position.
 */
pub async fn swap_players(
    Extension(state): Extension<AppState>,
    Path(team_id): Path<i64>,
    Json(payload): Json<SwapPlayers>,
) -> Result<impl IntoResponse, FantasyError> {
    let roster = state
        .rosters
        .swap_bench_field(team_id, payload.bench_player_id, payload.field_player_id)
        .await?;
    refresh_score(&state, team_id).await;
    Ok(roster_response(roster))
}
