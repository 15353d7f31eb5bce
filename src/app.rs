use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::repository::{PlayerCatalog, SqliteStore};
use crate::routes::{leagues, players, scores, teams};
use crate::services::league_aggregator::LeagueAggregator;
use crate::services::roster_manager::{RosterManager, TeamLocks};
use crate::services::score_calculator::ScoreCalculator;

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn PlayerCatalog>,
    pub rosters: Arc<RosterManager>,
    pub scores: Arc<ScoreCalculator>,
    pub leagues: Arc<LeagueAggregator>,
    pub locks: TeamLocks,
}

impl AppState {
    pub fn new(store: SqliteStore, sweep_concurrency: usize) -> Self {
        let store = Arc::new(store);
        let locks = TeamLocks::default();
        AppState {
            catalog: store.clone(),
            rosters: Arc::new(RosterManager::new(store.clone(), store.clone(), locks.clone())),
            scores: Arc::new(ScoreCalculator::new(
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
                locks.clone(),
                sweep_concurrency,
            )),
            locks,
            leagues: Arc::new(LeagueAggregator::new(store.clone(), store)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/players", get(players::get_players))
        .route("/teams", post(teams::create_team))
        .route("/users/{owner_id}/team", get(teams::get_team_by_owner))
        .route("/teams/{id}/roster", get(teams::get_roster))
        .route("/teams/{id}/limits", get(teams::get_limits))
        .route("/teams/{id}/players", post(teams::add_player))
        .route("/teams/{id}/players/{player_id}", delete(teams::remove_player))
        .route("/teams/{id}/swap", post(teams::swap_players))
        .route("/teams/{id}/scores", get(scores::get_cumulative_scores))
        .route("/teams/{id}/scores/{jornada}", get(scores::get_team_score))
        .route("/scores/recompute", post(scores::recompute_all))
        .route("/leagues/{id}/ranking", get(leagues::get_ranking))
        .layer(Extension(state))
        .layer(cors)
}
