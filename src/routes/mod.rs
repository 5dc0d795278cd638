use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

pub mod games;
pub mod health;
pub mod images;
pub mod players;
pub mod teams;

/// All API routes, without the CORS and trace layers added in `main`.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Root and health
        .route("/", get(|| async { "Scorebook API - v1.0" }))
        .route("/health", get(health::health_check))

        // Team endpoints
        .route("/api/teams", get(teams::get_teams).post(teams::create_team))
        .route(
            "/api/teams/{id}",
            get(teams::get_team_by_id).put(teams::rename_team).delete(teams::delete_team),
        )
        .route("/api/teams/{id}/stats", get(players::get_roster_stats))

        // Roster endpoints
        .route("/api/teams/{id}/players", post(players::add_player))
        .route(
            "/api/teams/{id}/players/{player_id}",
            put(players::update_player).delete(players::remove_player),
        )
        .route("/api/teams/{id}/players/{player_id}/photo", put(players::upload_photo))
        .route("/api/teams/{id}/players/{player_id}/stats", get(players::get_player_stats))

        // Game endpoints
        .route("/api/teams/{id}/seasons", get(games::get_seasons))
        .route("/api/teams/{id}/games", get(games::list_games).post(games::create_game))
        .route(
            "/api/teams/{id}/games/{game_id}",
            get(games::get_game).delete(games::delete_game),
        )
        .route("/api/teams/{id}/games/{game_id}/actions", post(games::apply_action))
        .route("/api/teams/{id}/games/{game_id}/scoreboard", get(games::get_scoreboard))

        // Player photos
        .route("/api/images/{*path}", get(images::get_image))

        .with_state(state)
}
