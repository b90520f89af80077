use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::str::FromStr;
use std::sync::Arc;

use salonbook_core::errors::SalonError;
use salonbook_core::models::user::{LoginRequest, RegisterUserRequest, Role, UserResponse};
use salonbook_db::models::DbUser;
use uuid::Uuid;

use crate::middleware::{auth, error_handling::AppError};
use crate::ApiState;

pub(crate) fn to_response(user: DbUser) -> Result<UserResponse, SalonError> {
    Ok(UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        role: Role::from_str(&user.role)?,
        created_at: user.created_at,
    })
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError(SalonError::Validation(
            "Name and email are required".to_string(),
        )));
    }
    if payload.password.len() < 8 {
        return Err(AppError(SalonError::Validation(
            "Password must be at least 8 characters".to_string(),
        )));
    }

    let existing = salonbook_db::repositories::users::get_user_by_email(
        &state.db_pool,
        payload.email.trim(),
    )
    .await
    .map_err(SalonError::Database)?;

    if existing.is_some() {
        return Err(AppError(SalonError::Conflict(
            "An account with this email already exists".to_string(),
        )));
    }

    let password_hash = auth::hash_password(&payload.password).map_err(SalonError::Database)?;

    let user = salonbook_db::repositories::users::create_user(
        &state.db_pool,
        payload.name.trim(),
        payload.email.trim(),
        &password_hash,
        payload.role.as_str(),
    )
    .await
    .map_err(SalonError::Database)?;

    Ok((StatusCode::CREATED, Json(to_response(user)?)))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = salonbook_db::repositories::users::get_user_by_email(
        &state.db_pool,
        payload.email.trim(),
    )
    .await
    .map_err(SalonError::Database)?
    .ok_or_else(|| SalonError::Authentication("Invalid email or password".to_string()))?;

    let valid = auth::verify_password(&payload.password, &user.password_hash)?;
    if !valid {
        return Err(AppError(SalonError::Authentication(
            "Invalid email or password".to_string(),
        )));
    }

    Ok(Json(to_response(user)?))
}

#[axum::debug_handler]
pub async fn get_user(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = salonbook_db::repositories::users::get_user_by_id(&state.db_pool, id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("User with ID {} not found", id)))?;

    Ok(Json(to_response(user)?))
}
