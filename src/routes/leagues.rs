use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::app::AppState;
use crate::dto::request_team_dto::RankingQuery;
use crate::error::FantasyError;

/**
 * GET the league table, optionally as it stood after a given jornada.
 */
pub async fn get_ranking(
    Extension(state): Extension<AppState>,
    Path(league_id): Path<i64>,
    Query(query): Query<RankingQuery>,
) -> Result<impl IntoResponse, FantasyError> {
    let ranking = state.leagues.ranking(league_id, query.jornada).await?;
    Ok((StatusCode::OK, Json(ranking)))
}
