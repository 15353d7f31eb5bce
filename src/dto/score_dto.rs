use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Settled statistics of one player in one jornada, as delivered by the stats feed.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchdayStat {
    pub player_id: i64,
    pub jornada_id: i64,
    pub minutes: i64,
    pub goals: i64,
    pub assists: i64,
    pub yellow: i64,
    pub red: i64,
    pub goals_conceded: i64,
}

/// A matchday. The id is its ordinal number, so jornadas sort by id.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, Copy, PartialEq, Eq)]
pub struct Jornada {
    pub id: i64,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

impl Jornada {
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.starts_on <= day && day <= self.ends_on
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, Copy, PartialEq, Eq)]
pub struct PlayerScore {
    pub player_id: i64,
    pub jornada_id: i64,
    pub points: i64,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, Copy, PartialEq, Eq)]
pub struct TeamScore {
    pub team_id: i64,
    pub jornada_id: i64,
    pub points: i64,
    pub cumulative_points: i64,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SweepFailure {
    pub team_id: i64,
    pub jornada_id: i64,
    pub error: String,
}

/// Outcome of a full recomputation sweep.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub teams: usize,
    pub recomputed: usize,
    pub failures: Vec<SweepFailure>,
}
