use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
};

use crate::db;
use crate::error::{ApiError, ScoreError};
use crate::models::{Player, PlayerForm};
use crate::state::AppState;
use crate::stats::{self, PlayerStatsReport};

// POST /api/teams/:id/players - Add a player to the roster
pub async fn add_player(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(form): Json<PlayerForm>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let mut team = state.team(&team_id).await?;
    let player = team.add_player(&form)?.clone();
    state.save_team(&team).await?;

    Ok((StatusCode::CREATED, Json(player)))
}

// PUT /api/teams/:id/players/:player_id - Edit a player
pub async fn update_player(
    State(state): State<AppState>,
    Path((team_id, player_id)): Path<(String, String)>,
    Json(form): Json<PlayerForm>,
) -> Result<Json<Player>, ApiError> {
    let mut team = state.team(&team_id).await?;
    let player = team.update_player(&player_id, &form)?.clone();
    state.save_team(&team).await?;

    Ok(Json(player))
}

// DELETE /api/teams/:id/players/:player_id - Remove a player from the roster
pub async fn remove_player(
    State(state): State<AppState>,
    Path((team_id, player_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let mut team = state.team(&team_id).await?;
    team.remove_player(&player_id)?;
    state.save_team(&team).await?;

    Ok(StatusCode::NO_CONTENT)
}

// PUT /api/teams/:id/players/:player_id/photo - Upload a player photo (raw body)
pub async fn upload_photo(
    State(state): State<AppState>,
    Path((team_id, player_id)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Player>, ApiError> {
    let mut team = state.team(&team_id).await?;
    if team.player(&player_id).is_none() {
        return Err(ScoreError::PlayerNotFound(player_id).into());
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream");
    let path = format!("{team_id}/{player_id}");
    let reference = db::store_image(&state.pool, &path, content_type, &body).await?;

    team.set_player_photo(&player_id, reference)?;
    state.save_team(&team).await?;

    let player = team.player(&player_id).cloned().ok_or(ApiError::NotFound)?;
    Ok(Json(player))
}

// GET /api/teams/:id/players/:player_id/stats - Career batting and pitching
pub async fn get_player_stats(
    State(state): State<AppState>,
    Path((team_id, player_id)): Path<(String, String)>,
) -> Result<Json<PlayerStatsReport>, ApiError> {
    let team = state.team(&team_id).await?;
    let player = team
        .player(&player_id)
        .ok_or_else(|| ScoreError::PlayerNotFound(player_id.clone()))?;

    Ok(Json(stats::player_report(&team, player)))
}

// GET /api/teams/:id/stats - Career lines for the whole roster
pub async fn get_roster_stats(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<Vec<PlayerStatsReport>>, ApiError> {
    let team = state.team(&team_id).await?;
    let reports = team
        .players
        .iter()
        .map(|player| stats::player_report(&team, player))
        .collect();

    Ok(Json(reports))
}
