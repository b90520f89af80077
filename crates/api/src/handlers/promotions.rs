use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::str::FromStr;
use std::sync::Arc;

use salonbook_core::errors::SalonError;
use salonbook_core::models::promotion::{CreatePromotionRequest, PromotionResponse};
use salonbook_core::pricing::DiscountKind;
use salonbook_db::models::DbPromotion;
use uuid::Uuid;

use crate::handlers::salons::require_salon_owner;
use crate::middleware::error_handling::AppError;
use crate::ApiState;

fn to_response(promotion: DbPromotion) -> Result<PromotionResponse, SalonError> {
    Ok(PromotionResponse {
        id: promotion.id,
        salon_id: promotion.salon_id,
        code: promotion.code,
        discount_kind: DiscountKind::from_str(&promotion.discount_kind)?,
        discount_value: promotion.discount_value,
        active: promotion.active,
        starts_at: promotion.starts_at,
        ends_at: promotion.ends_at,
    })
}

#[axum::debug_handler]
pub async fn create_promotion(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
    Json(payload): Json<CreatePromotionRequest>,
) -> Result<(StatusCode, Json<PromotionResponse>), AppError> {
    require_salon_owner(&state.db_pool, salon_id, payload.acting_user_id).await?;

    if payload.code.trim().is_empty() {
        return Err(AppError(SalonError::Validation(
            "Promo code is required".to_string(),
        )));
    }
    if payload.ends_at <= payload.starts_at {
        return Err(AppError(SalonError::Validation(
            "Promotion end must be after its start".to_string(),
        )));
    }

    let promotion = salonbook_db::repositories::promotions::create_promotion(
        &state.db_pool,
        salon_id,
        payload.code.trim(),
        payload.discount_kind.as_str(),
        payload.discount_value,
        payload.starts_at,
        payload.ends_at,
    )
    .await
    .map_err(SalonError::Database)?;

    Ok((StatusCode::CREATED, Json(to_response(promotion)?)))
}

#[derive(Debug, serde::Deserialize)]
pub struct DeactivatePromotionRequest {
    pub acting_user_id: Uuid,
}

#[axum::debug_handler]
pub async fn deactivate_promotion(
    State(state): State<Arc<ApiState>>,
    Path((salon_id, promotion_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<DeactivatePromotionRequest>,
) -> Result<StatusCode, AppError> {
    require_salon_owner(&state.db_pool, salon_id, payload.acting_user_id).await?;

    let deactivated = salonbook_db::repositories::promotions::deactivate_promotion(
        &state.db_pool,
        salon_id,
        promotion_id,
    )
    .await
    .map_err(SalonError::Database)?;

    if !deactivated {
        return Err(AppError(SalonError::NotFound(format!(
            "Promotion with ID {} not found",
            promotion_id
        ))));
    }

    Ok(StatusCode::OK)
}

#[axum::debug_handler]
pub async fn list_promotions(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
) -> Result<Json<Vec<PromotionResponse>>, AppError> {
    let promotions =
        salonbook_db::repositories::promotions::list_promotions_by_salon(&state.db_pool, salon_id)
            .await
            .map_err(SalonError::Database)?;

    let response = promotions
        .into_iter()
        .map(to_response)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(response))
}
