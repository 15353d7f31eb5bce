use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::dto::score_dto::TeamScore;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq, Eq)]
pub struct League {
    pub id: i64,
    pub name: String,
}

/// A league member that owns a team.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq, Eq)]
pub struct Participant {
    pub team_id: i64,
    pub team_name: String,
    pub owner_name: String,
    pub is_system: bool,
}

/// A participant together with the stored scores the ranking is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub participant: Participant,
    pub scores: Vec<TeamScore>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct JornadaPoints {
    pub jornada_id: i64,
    pub points: i64,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RankingEntry {
    pub rank: usize,
    pub team_id: i64,
    pub team_name: String,
    pub owner_name: String,
    pub jornada_points: i64,
    pub cumulative_points: i64,
    pub breakdown: Vec<JornadaPoints>,
}

#[derive(Debug, Serialize)]
pub struct LeagueRanking {
    pub league: League,
    pub jornada: Option<i64>,
    pub entries: Vec<RankingEntry>,
}
