use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

use salonbook_core::errors::SalonError;
use salonbook_core::models::loyalty::{
    ClaimVoucherRequest, CreateLoyaltyProgramRequest, LoyaltyProgramResponse,
    PointsBalanceResponse, VoucherResponse,
};
use salonbook_core::pricing::DiscountKind;
use salonbook_db::models::{DbCustomerVoucher, DbLoyaltyProgram};
use uuid::Uuid;

use crate::handlers::salons::require_salon_owner;
use crate::middleware::error_handling::AppError;
use crate::ApiState;

fn program_to_response(program: DbLoyaltyProgram) -> Result<LoyaltyProgramResponse, SalonError> {
    Ok(LoyaltyProgramResponse {
        id: program.id,
        salon_id: program.salon_id,
        name: program.name,
        points_required: program.points_required,
        discount_kind: DiscountKind::from_str(&program.discount_kind)?,
        discount_value: program.discount_value,
        tag: program.tag,
    })
}

fn voucher_to_response(voucher: DbCustomerVoucher, salon_id: Uuid) -> VoucherResponse {
    VoucherResponse {
        id: voucher.id,
        customer_id: voucher.customer_id,
        program_id: voucher.program_id,
        salon_id,
        redeemed_at: voucher.redeemed_at,
        claimed_at: voucher.claimed_at,
    }
}

#[axum::debug_handler]
pub async fn create_program(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
    Json(payload): Json<CreateLoyaltyProgramRequest>,
) -> Result<(StatusCode, Json<LoyaltyProgramResponse>), AppError> {
    require_salon_owner(&state.db_pool, salon_id, payload.acting_user_id).await?;

    if payload.points_required <= 0 {
        return Err(AppError(SalonError::Validation(
            "Points required must be positive".to_string(),
        )));
    }

    let program = salonbook_db::repositories::loyalty::create_program(
        &state.db_pool,
        salon_id,
        payload.name.trim(),
        payload.points_required,
        payload.discount_kind.as_str(),
        payload.discount_value,
        payload.tag.as_deref(),
    )
    .await
    .map_err(SalonError::Database)?;

    Ok((StatusCode::CREATED, Json(program_to_response(program)?)))
}

#[axum::debug_handler]
pub async fn list_programs(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
) -> Result<Json<Vec<LoyaltyProgramResponse>>, AppError> {
    let programs =
        salonbook_db::repositories::loyalty::list_programs_by_salon(&state.db_pool, salon_id)
            .await
            .map_err(SalonError::Database)?;

    let response = programs
        .into_iter()
        .map(program_to_response)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn claim_voucher(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ClaimVoucherRequest>,
) -> Result<(StatusCode, Json<VoucherResponse>), AppError> {
    let program =
        salonbook_db::repositories::loyalty::get_program_by_id(&state.db_pool, payload.program_id)
            .await
            .map_err(SalonError::Database)?
            .ok_or_else(|| {
                SalonError::NotFound(format!(
                    "Loyalty program with ID {} not found",
                    payload.program_id
                ))
            })?;

    let voucher = salonbook_db::repositories::loyalty::claim_voucher(
        &state.db_pool,
        payload.customer_id,
        payload.program_id,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(voucher_to_response(voucher, program.salon_id)),
    ))
}

#[derive(Debug, Deserialize)]
pub struct PointsQuery {
    pub customer_id: Uuid,
    pub salon_id: Uuid,
}

#[axum::debug_handler]
pub async fn get_points(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<PointsQuery>,
) -> Result<Json<PointsBalanceResponse>, AppError> {
    let balance = salonbook_db::repositories::loyalty::get_points_balance(
        &state.db_pool,
        query.customer_id,
        query.salon_id,
    )
    .await
    .map_err(SalonError::Database)?;

    // A customer with no payments yet simply has a zero balance.
    let response = match balance {
        Some(points) => PointsBalanceResponse {
            customer_id: points.customer_id,
            salon_id: points.salon_id,
            points_earned: points.points_earned,
            points_redeemed: points.points_redeemed,
            points_available: points.points_available,
        },
        None => PointsBalanceResponse {
            customer_id: query.customer_id,
            salon_id: query.salon_id,
            points_earned: 0,
            points_redeemed: 0,
            points_available: 0,
        },
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn list_vouchers(
    State(state): State<Arc<ApiState>>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<Vec<VoucherResponse>>, AppError> {
    let vouchers =
        salonbook_db::repositories::loyalty::list_vouchers_by_customer(&state.db_pool, customer_id)
            .await
            .map_err(SalonError::Database)?;

    let mut response = Vec::with_capacity(vouchers.len());
    for voucher in vouchers {
        let program = salonbook_db::repositories::loyalty::get_program_by_id(
            &state.db_pool,
            voucher.program_id,
        )
        .await
        .map_err(SalonError::Database)?;

        let salon_id = program.map(|p| p.salon_id).unwrap_or_default();
        response.push(voucher_to_response(voucher, salon_id));
    }

    Ok(Json(response))
}
