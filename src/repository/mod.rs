// Persistence ports. Services only see these traits; `sqlite` implements
// all of them over one pool.

pub mod sqlite;

use async_trait::async_trait;

use crate::dto::league_dto::{League, Participant};
use crate::dto::player_dto::{Money, Player, PlayersByPosition};
use crate::dto::score_dto::{Jornada, MatchdayStat, PlayerScore, TeamScore};
use crate::dto::team_dto::Team;
use crate::dto::user_dto::User;
use crate::error::FantasyResult;
use crate::services::roster::{RosterCommit, TeamRoster};

pub use sqlite::SqliteStore;

/// Read-only player catalog.
#[async_trait]
pub trait PlayerCatalog: Send + Sync {
    async fn get_player(&self, player_id: i64) -> FantasyResult<Option<Player>>;

    async fn list_by_position(&self) -> FantasyResult<PlayersByPosition>;
}

/// Settled per-player statistics. Absent when the player did not feature.
#[async_trait]
pub trait MatchStatsFeed: Send + Sync {
    async fn get_stats(&self, player_id: i64, jornada_id: i64) -> FantasyResult<Option<MatchdayStat>>;
}

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn find_user(&self, user_id: i64) -> FantasyResult<Option<User>>;

    /// Fails `AlreadyExists` when the owner already has a team.
    async fn create_team(&self, name: &str, owner_id: i64, budget: Money) -> FantasyResult<Team>;

    async fn find_team_by_owner(&self, owner_id: i64) -> FantasyResult<Option<Team>>;

    async fn load_roster(&self, team_id: i64) -> FantasyResult<Option<TeamRoster>>;

    /// The team whose roster holds `player_id`, if any.
    async fn team_holding(&self, player_id: i64) -> FantasyResult<Option<i64>>;

    /// Writes the commit atomically. Fails without writing anything if the
    /// team version moved since the commit was planned.
    async fn commit(&self, commit: &RosterCommit) -> FantasyResult<()>;

    async fn list_team_ids(&self) -> FantasyResult<Vec<i64>>;
}

/// Everything one (team, jornada) recomputation writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamJornadaResult {
    pub team_id: i64,
    pub jornada_id: i64,
    pub points: i64,
    pub player_scores: Vec<PlayerScore>,
}

#[async_trait]
pub trait ScoreRepository: Send + Sync {
    async fn list_jornadas(&self) -> FantasyResult<Vec<Jornada>>;

    async fn save_player_score(&self, score: &PlayerScore) -> FantasyResult<()>;

    /// Overwrites the team's row for the jornada, rebuilds every cumulative
    /// value of the team by summation and refreshes its total, in one
    /// transaction. Returns the stored row.
    async fn save_team_jornada(&self, result: &TeamJornadaResult) -> FantasyResult<TeamScore>;

    async fn team_score(&self, team_id: i64, jornada_id: i64) -> FantasyResult<Option<TeamScore>>;

    /// All stored rows of a team, ordered by jornada.
    async fn team_scores(&self, team_id: i64) -> FantasyResult<Vec<TeamScore>>;
}

#[async_trait]
pub trait LeagueRepository: Send + Sync {
    async fn find_league(&self, league_id: i64) -> FantasyResult<Option<League>>;

    /// Members of the league that own a team, system accounts included.
    async fn participants(&self, league_id: i64) -> FantasyResult<Vec<Participant>>;
}
