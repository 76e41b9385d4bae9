//! User endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use groundwork_users::{CreateUserInput, UserOutput};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserOutput>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::bad_request("invalid UUID format"))?;

    let user = state.user_service.get_user(id).await?;
    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserInput>, JsonRejection>,
) -> Result<(StatusCode, Json<UserOutput>), ApiError> {
    let Json(input) = body.map_err(|_| ApiError::bad_request("invalid parameter"))?;

    let user = state.user_service.create_user(&input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
