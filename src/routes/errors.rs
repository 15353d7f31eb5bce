use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{ErrorKind, FantasyError};

impl FantasyError {
    pub fn status(&self) -> StatusCode {
        match self {
            FantasyError::NotFound { .. } => StatusCode::NOT_FOUND,
            FantasyError::AlreadyExists { .. } | FantasyError::Duplicate { .. } | FantasyError::PlayerTaken { .. } => {
                StatusCode::CONFLICT
            }
            _ => match self.kind() {
                ErrorKind::Validation | ErrorKind::Resource => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::State => StatusCode::CONFLICT,
                ErrorKind::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for FantasyError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "kind": self.code(), "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
