use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::error::ApiError;
use crate::models::{NewTeam, Team, TeamSummary};
use crate::state::AppState;

// GET /api/teams - List all teams
pub async fn get_teams(State(state): State<AppState>) -> Result<Json<Vec<TeamSummary>>, ApiError> {
    let teams = state.load_all_teams().await?;

    Ok(Json(teams.iter().map(TeamSummary::from).collect()))
}

// POST /api/teams - Create a team
pub async fn create_team(
    State(state): State<AppState>,
    Json(body): Json<NewTeam>,
) -> Result<(StatusCode, Json<Team>), ApiError> {
    let team = Team::new(&body.name)?;
    state.save_team(&team).await?;

    tracing::info!(team = %team.id, name = %team.name, "team created");
    Ok((StatusCode::CREATED, Json(team)))
}

// GET /api/teams/:id - Get team with roster and games
pub async fn get_team_by_id(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<Team>, ApiError> {
    Ok(Json(state.team(&team_id).await?))
}

// PUT /api/teams/:id - Rename a team
pub async fn rename_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(body): Json<NewTeam>,
) -> Result<Json<Team>, ApiError> {
    let mut team = state.team(&team_id).await?;
    team.rename(&body.name)?;
    state.save_team(&team).await?;

    Ok(Json(team))
}

// DELETE /api/teams/:id - Delete a team and its history
pub async fn delete_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.delete_team(&team_id).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!(team = %team_id, "team deleted");
    Ok(StatusCode::NO_CONTENT)
}
