use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use crate::error::{ApiError, ScoreError};
use crate::models::{Game, GameSummary};
use crate::scoring::{GameAction, GameSetup, Scoreboard};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SeasonParams {
    pub year: Option<i32>,
}

// GET /api/teams/:id/seasons - Years with at least one game
pub async fn get_seasons(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<Vec<i32>>, ApiError> {
    let team = state.team(&team_id).await?;

    Ok(Json(team.seasons()))
}

// GET /api/teams/:id/games?year=2024 - Game history, optionally one season
pub async fn list_games(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(params): Query<SeasonParams>,
) -> Result<Json<Vec<GameSummary>>, ApiError> {
    let team = state.team(&team_id).await?;

    let summaries = match params.year {
        Some(year) => team.games_in_season(year).into_iter().map(GameSummary::from).collect(),
        None => team.games.iter().map(GameSummary::from).collect(),
    };

    Ok(Json(summaries))
}

// POST /api/teams/:id/games - Start a new game
pub async fn create_game(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(setup): Json<GameSetup>,
) -> Result<(StatusCode, Json<Game>), ApiError> {
    let mut team = state.team(&team_id).await?;
    let game = team.start_game(&setup)?.clone();
    state.save_team(&team).await?;

    Ok((StatusCode::CREATED, Json(game)))
}

// GET /api/teams/:id/games/:game_id - Full game state
pub async fn get_game(
    State(state): State<AppState>,
    Path((team_id, game_id)): Path<(String, String)>,
) -> Result<Json<Game>, ApiError> {
    let team = state.team(&team_id).await?;
    let game = team
        .game(&game_id)
        .cloned()
        .ok_or(ScoreError::GameNotFound(game_id))?;

    Ok(Json(game))
}

// DELETE /api/teams/:id/games/:game_id - Remove a game from history
pub async fn delete_game(
    State(state): State<AppState>,
    Path((team_id, game_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let mut team = state.team(&team_id).await?;
    team.delete_game(&game_id)?;
    state.save_team(&team).await?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/teams/:id/games/:game_id/actions - Apply one scorer action
pub async fn apply_action(
    State(state): State<AppState>,
    Path((team_id, game_id)): Path<(String, String)>,
    Json(action): Json<GameAction>,
) -> Result<Json<Game>, ApiError> {
    let mut team = state.team(&team_id).await?;
    tracing::debug!(team = %team_id, game = %game_id, ?action, "applying action");

    let game = team.with_game(&game_id, |game, roster| {
        game.apply(action, roster)?;
        Ok(game.clone())
    })?;
    state.save_team(&team).await?;

    Ok(Json(game))
}

// GET /api/teams/:id/games/:game_id/scoreboard - Inning-by-inning line score
pub async fn get_scoreboard(
    State(state): State<AppState>,
    Path((team_id, game_id)): Path<(String, String)>,
) -> Result<Json<Scoreboard>, ApiError> {
    let team = state.team(&team_id).await?;
    let game = team.game(&game_id).ok_or(ScoreError::GameNotFound(game_id.clone()))?;

    Ok(Json(Scoreboard::for_game(&team.name, game)))
}
