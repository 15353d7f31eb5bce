use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::dto::player_dto::{Money, Player, Position};

/// Budget every team starts with: 100.0 credits.
pub const INITIAL_BUDGET: Money = Money::from_cents(10_000);

/// Roster size of a complete team.
pub const SQUAD_SIZE: usize = 15;

/// Reserves on a complete team.
pub const BENCH_SIZE: usize = 4;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub budget_remaining: Money,
    pub total_points: i64,
    pub version: i64,
}

/// Which half of the roster a player sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Field,
    Bench,
}

impl Zone {
    pub fn from_on_field(on_field: bool) -> Self {
        if on_field { Zone::Field } else { Zone::Bench }
    }

    pub fn is_field(self) -> bool {
        self == Zone::Field
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Field => f.write_str("field"),
            Zone::Bench => f.write_str("bench"),
        }
    }
}

/// A roster slot joined with the catalog entry of its player.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RosterEntry {
    #[serde(flatten)]
    pub player: Player,
    pub on_field: bool,
}

impl RosterEntry {
    pub fn zone(&self) -> Zone {
        Zone::from_on_field(self.on_field)
    }
}

/// Field/bench head counts per position, indexed by [`Position::index`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormationCounts {
    pub field: [usize; 4],
    pub bench: [usize; 4],
}

impl FormationCounts {
    pub fn field_of(&self, position: Position) -> usize {
        self.field[position.index()]
    }

    pub fn bench_of(&self, position: Position) -> usize {
        self.bench[position.index()]
    }

    pub fn total_of(&self, position: Position) -> usize {
        self.field_of(position) + self.bench_of(position)
    }

    pub fn total(&self) -> usize {
        self.field.iter().sum::<usize>() + self.bench.iter().sum::<usize>()
    }

    pub fn bench_total(&self) -> usize {
        self.bench.iter().sum()
    }

    pub fn record(&mut self, position: Position, zone: Zone) {
        match zone {
            Zone::Field => self.field[position.index()] += 1,
            Zone::Bench => self.bench[position.index()] += 1,
        }
    }
}

/// Players of a team grouped by position, as shown on a team sheet.
#[derive(Debug, Serialize)]
pub struct RosterView {
    pub team: Team,
    pub goalkeepers: Vec<RosterEntry>,
    pub defenders: Vec<RosterEntry>,
    pub midfielders: Vec<RosterEntry>,
    pub forwards: Vec<RosterEntry>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PositionLimit {
    pub position: Position,
    pub on_field: usize,
    pub on_bench: usize,
    pub ceiling: usize,
    pub can_add: bool,
}

/// What a team may still do, so callers can pre-check a mutation.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TeamLimits {
    pub team_id: i64,
    pub positions: Vec<PositionLimit>,
    pub total_players: usize,
    pub budget_remaining: Money,
    pub squad_value: Money,
    pub can_add_player: bool,
}

impl TeamLimits {
    pub fn for_position(&self, position: Position) -> Option<&PositionLimit> {
        self.positions.iter().find(|limit| limit.position == position)
    }
}
