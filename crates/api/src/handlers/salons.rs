use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::str::FromStr;
use std::sync::Arc;

use salonbook_core::errors::SalonError;
use salonbook_core::models::review::{CreateReviewRequest, ReviewResponse};
use salonbook_core::models::salon::{
    CreateEmployeeRequest, CreateSalonRequest, CreateTimeSlotRequest, EmployeeResponse,
    SalonResponse, TimeSlotResponse, VerificationStatus,
};
use salonbook_core::models::user::Role;
use salonbook_db::models::{DbSalon, DbTimeSlot};
use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::error_handling::AppError;
use crate::ApiState;

pub(crate) fn to_response(salon: DbSalon) -> Result<SalonResponse, SalonError> {
    Ok(SalonResponse {
        id: salon.id,
        owner_id: salon.owner_id,
        name: salon.name,
        address: salon.address,
        verification_status: VerificationStatus::from_str(&salon.verification_status)?,
        created_at: salon.created_at,
    })
}

fn slot_to_response(slot: DbTimeSlot) -> TimeSlotResponse {
    TimeSlotResponse {
        id: slot.id,
        employee_id: slot.employee_id,
        date: slot.date,
        day_of_week: slot.day_of_week,
        start_time: slot.start_time,
        end_time: slot.end_time,
    }
}

/// Owner-scoped writes go through here: the acting user must own the salon.
pub(crate) async fn require_salon_owner(
    pool: &PgPool,
    salon_id: Uuid,
    acting_user_id: Uuid,
) -> Result<DbSalon, SalonError> {
    let salon = salonbook_db::repositories::salons::get_salon_by_id(pool, salon_id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("Salon with ID {} not found", salon_id)))?;

    if salon.owner_id != acting_user_id {
        return Err(SalonError::Authorization(
            "Only the salon owner may do this".to_string(),
        ));
    }

    Ok(salon)
}

/// Folds an ownership check into a yes/no permission. A missing salon or a
/// different owner answers no; an infrastructure failure is not an answer
/// and propagates.
pub fn owner_permission(check: Result<DbSalon, SalonError>) -> Result<bool, SalonError> {
    match check {
        Ok(_) => Ok(true),
        Err(SalonError::NotFound(_) | SalonError::Authorization(_)) => Ok(false),
        Err(err) => Err(err),
    }
}

#[axum::debug_handler]
pub async fn create_salon(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateSalonRequest>,
) -> Result<(StatusCode, Json<SalonResponse>), AppError> {
    let owner = salonbook_db::repositories::users::get_user_by_id(&state.db_pool, payload.owner_id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| {
            SalonError::NotFound(format!("User with ID {} not found", payload.owner_id))
        })?;

    if Role::from_str(&owner.role)? != Role::Owner {
        return Err(AppError(SalonError::Authorization(
            "Only owner accounts may register salons".to_string(),
        )));
    }
    if payload.name.trim().is_empty() {
        return Err(AppError(SalonError::Validation(
            "Salon name is required".to_string(),
        )));
    }

    let salon = salonbook_db::repositories::salons::create_salon(
        &state.db_pool,
        payload.owner_id,
        payload.name.trim(),
        payload.address.trim(),
    )
    .await
    .map_err(SalonError::Database)?;

    Ok((StatusCode::CREATED, Json(to_response(salon)?)))
}

#[axum::debug_handler]
pub async fn list_salons(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<SalonResponse>>, AppError> {
    let salons = salonbook_db::repositories::salons::list_approved_salons(&state.db_pool)
        .await
        .map_err(SalonError::Database)?;

    let response = salons
        .into_iter()
        .map(to_response)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn get_salon(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SalonResponse>, AppError> {
    let salon = salonbook_db::repositories::salons::get_salon_by_id(&state.db_pool, id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("Salon with ID {} not found", id)))?;

    Ok(Json(to_response(salon)?))
}

#[axum::debug_handler]
pub async fn create_employee(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), AppError> {
    require_salon_owner(&state.db_pool, salon_id, payload.acting_user_id).await?;

    let employee = salonbook_db::repositories::salons::create_employee(
        &state.db_pool,
        salon_id,
        payload.name.trim(),
        payload.title.trim(),
    )
    .await
    .map_err(SalonError::Database)?;

    Ok((
        StatusCode::CREATED,
        Json(EmployeeResponse {
            id: employee.id,
            salon_id: employee.salon_id,
            name: employee.name,
            title: employee.title,
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_employees(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
) -> Result<Json<Vec<EmployeeResponse>>, AppError> {
    let employees =
        salonbook_db::repositories::salons::list_employees_by_salon(&state.db_pool, salon_id)
            .await
            .map_err(SalonError::Database)?;

    Ok(Json(
        employees
            .into_iter()
            .map(|e| EmployeeResponse {
                id: e.id,
                salon_id: e.salon_id,
                name: e.name,
                title: e.title,
            })
            .collect(),
    ))
}

#[axum::debug_handler]
pub async fn create_time_slot(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateTimeSlotRequest>,
) -> Result<(StatusCode, Json<TimeSlotResponse>), AppError> {
    match (payload.date, payload.day_of_week) {
        (Some(_), Some(_)) | (None, None) => {
            return Err(AppError(SalonError::Validation(
                "Provide either a date or a day of week, not both".to_string(),
            )));
        }
        (None, Some(dow)) if !(0..=6).contains(&dow) => {
            return Err(AppError(SalonError::Validation(
                "Day of week must be 0 (Monday) through 6 (Sunday)".to_string(),
            )));
        }
        _ => {}
    }
    if payload.end_time <= payload.start_time {
        return Err(AppError(SalonError::Validation(
            "Slot end must be after its start".to_string(),
        )));
    }

    let employee = salonbook_db::repositories::salons::get_employee_by_id(
        &state.db_pool,
        payload.employee_id,
    )
    .await
    .map_err(SalonError::Database)?
    .ok_or_else(|| {
        SalonError::NotFound(format!("Employee with ID {} not found", payload.employee_id))
    })?;

    require_salon_owner(&state.db_pool, employee.salon_id, payload.acting_user_id).await?;

    let slot = salonbook_db::repositories::salons::create_time_slot(
        &state.db_pool,
        payload.employee_id,
        payload.date,
        payload.day_of_week,
        payload.start_time,
        payload.end_time,
    )
    .await
    .map_err(SalonError::Database)?;

    Ok((StatusCode::CREATED, Json(slot_to_response(slot))))
}

#[axum::debug_handler]
pub async fn list_time_slots(
    State(state): State<Arc<ApiState>>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<Vec<TimeSlotResponse>>, AppError> {
    let slots =
        salonbook_db::repositories::salons::list_time_slots_by_employee(&state.db_pool, employee_id)
            .await
            .map_err(SalonError::Database)?;

    Ok(Json(slots.into_iter().map(slot_to_response).collect()))
}

#[axum::debug_handler]
pub async fn create_review(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), AppError> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError(SalonError::Validation(
            "Rating must be between 1 and 5".to_string(),
        )));
    }

    let review = salonbook_db::repositories::reviews::create_review(
        &state.db_pool,
        payload.customer_id,
        salon_id,
        payload.rating,
        payload.comment.as_deref(),
    )
    .await
    .map_err(SalonError::Database)?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewResponse {
            id: review.id,
            customer_id: review.customer_id,
            salon_id: review.salon_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_reviews(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let reviews = salonbook_db::repositories::reviews::list_reviews_by_salon(&state.db_pool, salon_id)
        .await
        .map_err(SalonError::Database)?;

    Ok(Json(
        reviews
            .into_iter()
            .map(|r| ReviewResponse {
                id: r.id,
                customer_id: r.customer_id,
                salon_id: r.salon_id,
                rating: r.rating,
                comment: r.comment,
                created_at: r.created_at,
            })
            .collect(),
    ))
}
