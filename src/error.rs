use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;

/// Broad class of a rejected operation, so callers can tell "fix your input"
/// from "not allowed right now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Validation,
    Guard,
    NotFound,
}

/// Why a scoring or roster operation was rejected. A rejected operation never
/// leaves partial changes behind.
#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("team name must not be empty")]
    EmptyTeamName,
    #[error("player name must not be empty")]
    EmptyPlayerName,
    #[error("jersey number {0} is already taken")]
    DuplicateNumber(u32),
    #[error("batting order must have between 1 and {max} players (got {got})")]
    BattingOrderSize { got: usize, max: usize },
    #[error("player {0} appears twice in the batting order")]
    DuplicateInOrder(String),
    #[error("player {0} is not on the roster")]
    NotOnRoster(String),
    #[error("pitcher {0} is not on the roster")]
    PitcherNotOnRoster(String),

    #[error("game is finished")]
    GameFinished,
    #[error("no current batter: the batting order is empty")]
    NoCurrentBatter,
    #[error("the team is not batting")]
    NotBatting,
    #[error("the team is not fielding")]
    NotFielding,
    #[error("three outs recorded: change sides first")]
    SideRetired,
    #[error("no pitcher of record")]
    NoCurrentPitcher,

    #[error("team {0} not found")]
    TeamNotFound(String),
    #[error("player {0} not found")]
    PlayerNotFound(String),
    #[error("game {0} not found")]
    GameNotFound(String),
    #[error("inning {0} not found")]
    InningNotFound(usize),
    #[error("at-bat {0} not found")]
    AtBatNotFound(usize),
}

impl ScoreError {
    pub fn class(&self) -> ErrorClass {
        use ScoreError::*;
        match self {
            MissingField(_) | EmptyTeamName | EmptyPlayerName | DuplicateNumber(_)
            | BattingOrderSize { .. } | DuplicateInOrder(_) | NotOnRoster(_)
            | PitcherNotOnRoster(_) => ErrorClass::Validation,
            GameFinished | NoCurrentBatter | NotBatting | NotFielding | SideRetired
            | NoCurrentPitcher => ErrorClass::Guard,
            TeamNotFound(_) | PlayerNotFound(_) | GameNotFound(_) | InningNotFound(_)
            | AtBatNotFound(_) => ErrorClass::NotFound,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error(transparent)]
    Rejected(#[from] ScoreError),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Storage(StoreError::Database(err))
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Rejected(err) => match err.class() {
                ErrorClass::Validation => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorClass::Guard => StatusCode::CONFLICT,
                ErrorClass::NotFound => StatusCode::NOT_FOUND,
            },
            ApiError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_map_to_statuses() {
        let cases = [
            (ApiError::from(ScoreError::DuplicateNumber(23)), StatusCode::UNPROCESSABLE_ENTITY),
            (ApiError::from(ScoreError::GameFinished), StatusCode::CONFLICT),
            (ApiError::from(ScoreError::GameNotFound("g".into())), StatusCode::NOT_FOUND),
            (ApiError::NotFound, StatusCode::NOT_FOUND),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
