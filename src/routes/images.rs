use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::db;
use crate::error::ApiError;
use crate::state::AppState;

// GET /api/images/*path - Serve a stored player photo
pub async fn get_image(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let image = db::load_image(&state.pool, &path)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(([(header::CONTENT_TYPE, image.content_type)], image.bytes).into_response())
}
