use thiserror::Error;

use crate::dto::player_dto::{Money, Position};
use crate::dto::team_dto::Zone;

/// Taxonomy class of a [`FantasyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Resource,
    State,
    Infrastructure,
}

#[derive(Debug, Error)]
pub enum FantasyError {
    #[error("owner {owner_id} already has a team")]
    AlreadyExists { owner_id: i64 },

    #[error("player {player_id} is already on this team")]
    Duplicate { player_id: i64 },

    #[error("player {player_id} already belongs to another team")]
    PlayerTaken { player_id: i64 },

    #[error("no room left for another {position}")]
    PositionFull { position: Position },

    #[error("{entity} {id} was not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("cannot swap a {bench} with a {field}")]
    PositionMismatch { bench: Position, field: Position },

    #[error("constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("price {price} exceeds remaining budget {available}")]
    InsufficientBudget { price: Money, available: Money },

    #[error("player {player_id} is not on the {expected}")]
    InvalidState { player_id: i64, expected: Zone },

    #[error("persistence failure during {step}: {reason}")]
    Infrastructure { step: &'static str, reason: String },
}

impl FantasyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FantasyError::AlreadyExists { .. }
            | FantasyError::Duplicate { .. }
            | FantasyError::PlayerTaken { .. }
            | FantasyError::PositionFull { .. }
            | FantasyError::NotFound { .. }
            | FantasyError::PositionMismatch { .. }
            | FantasyError::ConstraintViolation(_) => ErrorKind::Validation,
            FantasyError::InsufficientBudget { .. } => ErrorKind::Resource,
            FantasyError::InvalidState { .. } => ErrorKind::State,
            FantasyError::Infrastructure { .. } => ErrorKind::Infrastructure,
        }
    }

    /// Short machine-readable code, used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            FantasyError::AlreadyExists { .. } => "already_exists",
            FantasyError::Duplicate { .. } => "duplicate",
            FantasyError::PlayerTaken { .. } => "player_taken",
            FantasyError::PositionFull { .. } => "position_full",
            FantasyError::NotFound { .. } => "not_found",
            FantasyError::PositionMismatch { .. } => "position_mismatch",
            FantasyError::ConstraintViolation(_) => "constraint_violation",
            FantasyError::InsufficientBudget { .. } => "insufficient_budget",
            FantasyError::InvalidState { .. } => "invalid_state",
            FantasyError::Infrastructure { .. } => "infrastructure",
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Infrastructure
    }
}

/// Wraps a sqlx failure with the name of the step that issued it.
pub fn infra(step: &'static str) -> impl FnOnce(sqlx::Error) -> FantasyError {
    move |e| FantasyError::Infrastructure { step, reason: e.to_string() }
}

pub type FantasyResult<T> = Result<T, FantasyError>;
