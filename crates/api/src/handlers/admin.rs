use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use salonbook_core::errors::SalonError;
use salonbook_core::models::salon::{SalonResponse, VerificationStatus};
use salonbook_core::models::user::Role;
use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::error_handling::AppError;
use crate::ApiState;

async fn require_admin(pool: &PgPool, acting_user_id: Uuid) -> Result<(), SalonError> {
    let user = salonbook_db::repositories::users::get_user_by_id(pool, acting_user_id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| {
            SalonError::NotFound(format!("User with ID {} not found", acting_user_id))
        })?;

    if Role::from_str(&user.role)? != Role::Admin {
        return Err(SalonError::Authorization(
            "Admin role required".to_string(),
        ));
    }

    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifySalonRequest {
    pub acting_user_id: Uuid,
    pub decision: VerificationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifySalonResponse {
    pub decision: VerificationStatus,
    pub salon: Option<SalonResponse>,
}

/// Records an admin verification decision. Rejection removes the salon and
/// everything that hangs off it.
#[axum::debug_handler]
pub async fn verify_salon(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
    Json(payload): Json<VerifySalonRequest>,
) -> Result<Json<VerifySalonResponse>, AppError> {
    require_admin(&state.db_pool, payload.acting_user_id).await?;

    let salon =
        salonbook_db::repositories::admin::verify_salon(&state.db_pool, salon_id, payload.decision)
            .await?;

    let salon = match salon {
        Some(row) => Some(crate::handlers::salons::to_response(row)?),
        None => None,
    };

    Ok(Json(VerifySalonResponse {
        decision: payload.decision,
        salon,
    }))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveUserRequest {
    pub acting_user_id: Uuid,
}

#[axum::debug_handler]
pub async fn remove_user(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<RemoveUserRequest>,
) -> Result<StatusCode, AppError> {
    require_admin(&state.db_pool, payload.acting_user_id).await?;

    salonbook_db::repositories::admin::delete_user(&state.db_pool, user_id).await?;

    Ok(StatusCode::OK)
}
