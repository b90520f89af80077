use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

use salonbook_core::errors::SalonError;
use salonbook_core::models::appointment::{
    AppointmentResponse, AppointmentStatus, BookAppointmentRequest, UpdateAppointmentStatusRequest,
};
use salonbook_core::scheduling;
use salonbook_db::models::DbAppointment;
use uuid::Uuid;

use crate::middleware::error_handling::AppError;
use crate::ApiState;

pub(crate) fn to_response(appointment: DbAppointment) -> Result<AppointmentResponse, SalonError> {
    Ok(AppointmentResponse {
        id: appointment.id,
        customer_id: appointment.customer_id,
        salon_id: appointment.salon_id,
        employee_id: appointment.employee_id,
        service_id: appointment.service_id,
        date: appointment.date,
        start_time: appointment.start_time,
        end_time: appointment.end_time,
        status: AppointmentStatus::from_str(&appointment.status)?,
        created_at: appointment.created_at,
    })
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentResponse>), AppError> {
    let start_time = scheduling::parse_start_time(&payload.start_time)?;

    let appointment = salonbook_db::repositories::appointments::book(
        &state.db_pool,
        payload.customer_id,
        payload.salon_id,
        payload.employee_id,
        payload.service_id,
        payload.date,
        start_time,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(to_response(appointment)?)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment =
        salonbook_db::repositories::appointments::get_appointment_by_id(&state.db_pool, id)
            .await
            .map_err(SalonError::Database)?
            .ok_or_else(|| SalonError::NotFound(format!("Appointment with ID {} not found", id)))?;

    Ok(Json(to_response(appointment)?))
}

#[derive(Debug, Deserialize)]
pub struct ListAppointmentsQuery {
    pub customer_id: Option<Uuid>,
    pub salon_id: Option<Uuid>,
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListAppointmentsQuery>,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    let appointments = match (query.customer_id, query.salon_id) {
        (Some(customer_id), None) => {
            salonbook_db::repositories::appointments::list_appointments_by_customer(
                &state.db_pool,
                customer_id,
            )
            .await
            .map_err(SalonError::Database)?
        }
        (None, Some(salon_id)) => {
            salonbook_db::repositories::appointments::list_appointments_by_salon(
                &state.db_pool,
                salon_id,
            )
            .await
            .map_err(SalonError::Database)?
        }
        _ => {
            return Err(AppError(SalonError::Validation(
                "Provide exactly one of customer_id or salon_id".to_string(),
            )));
        }
    };

    let response = appointments
        .into_iter()
        .map(to_response)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(response))
}

/// Moves an appointment through its lifecycle. The customer may cancel
/// their own appointment; other transitions belong to the salon owner.
#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentStatusRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment =
        salonbook_db::repositories::appointments::get_appointment_by_id(&state.db_pool, id)
            .await
            .map_err(SalonError::Database)?
            .ok_or_else(|| SalonError::NotFound(format!("Appointment with ID {} not found", id)))?;

    let is_customer = appointment.customer_id == payload.acting_user_id;
    let ownership = crate::handlers::salons::require_salon_owner(
        &state.db_pool,
        appointment.salon_id,
        payload.acting_user_id,
    )
    .await;
    let is_owner = crate::handlers::salons::owner_permission(ownership)?;

    let allowed = match payload.status {
        AppointmentStatus::Cancelled => is_customer || is_owner,
        _ => is_owner,
    };
    if !allowed {
        return Err(AppError(SalonError::Authorization(
            "Not allowed to change this appointment".to_string(),
        )));
    }

    let updated =
        salonbook_db::repositories::appointments::update_status(&state.db_pool, id, payload.status)
            .await?;

    Ok(Json(to_response(updated)?))
}
