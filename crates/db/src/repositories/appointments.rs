use crate::models::DbAppointment;
use crate::repositories::db_err;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use salonbook_core::errors::{SalonError, SalonResult};
use salonbook_core::models::appointment::AppointmentStatus;
use salonbook_core::scheduling;
use sqlx::{Pool, Postgres};
use std::str::FromStr;
use uuid::Uuid;

/// Books an appointment: validates the service, availability, and overlap
/// inside one transaction holding a row lock on the employee, so two
/// concurrent requests for the same employee serialize. The exclusion
/// constraint on appointments backs this check at the store layer.
pub async fn book(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
    salon_id: Uuid,
    employee_id: Uuid,
    service_id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
) -> SalonResult<DbAppointment> {
    let mut tx = pool.begin().await.map_err(db_err)?;

    let service = sqlx::query_as::<_, (Uuid, i32)>(
        r#"
        SELECT salon_id, duration_minutes
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(service_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_err)?
    .ok_or_else(|| SalonError::NotFound(format!("Service with ID {} not found", service_id)))?;

    if service.0 != salon_id {
        return Err(SalonError::Validation(
            "Service does not belong to this salon".to_string(),
        ));
    }

    let end_time = scheduling::end_time(start_time, service.1)?;

    // Serializes concurrent bookings for the same employee.
    let employee_salon = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT salon_id
        FROM employees
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(employee_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_err)?
    .ok_or_else(|| SalonError::NotFound(format!("Employee with ID {} not found", employee_id)))?;

    if employee_salon != salon_id {
        return Err(SalonError::Validation(
            "Employee does not belong to this salon".to_string(),
        ));
    }

    let available = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM time_slots
            WHERE employee_id = $1
              AND (date = $2 OR day_of_week = $3)
              AND start_time <= $4
              AND end_time >= $5
        )
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .bind(scheduling::day_of_week(date))
    .bind(start_time)
    .bind(end_time)
    .fetch_one(&mut *tx)
    .await
    .map_err(db_err)?;

    if !available {
        return Err(SalonError::Validation(
            "Employee is not available at the requested time".to_string(),
        ));
    }

    let overlaps = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM appointments
            WHERE employee_id = $1
              AND date = $2
              AND status <> 'cancelled'
              AND start_time < $4
              AND end_time > $3
        )
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .fetch_one(&mut *tx)
    .await
    .map_err(db_err)?;

    if overlaps {
        return Err(SalonError::Conflict(
            "Employee already has an appointment in that time range".to_string(),
        ));
    }

    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Booking appointment: id={}, employee_id={}, date={}, start={}, end={}",
        id, employee_id, date, start_time, end_time
    );

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments
            (id, customer_id, salon_id, employee_id, service_id, date, start_time, end_time, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'booked', $9)
        RETURNING id, customer_id, salon_id, employee_id, service_id, date,
                  start_time, end_time, status, reminder_sent_at, created_at
        "#,
    )
    .bind(id)
    .bind(customer_id)
    .bind(salon_id)
    .bind(employee_id)
    .bind(service_id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(map_booking_error)?;

    tx.commit().await.map_err(db_err)?;

    Ok(appointment)
}

/// The exclusion constraint reports overlap as 23P01; surface it the same
/// way as the application-level check.
fn map_booking_error(err: sqlx::Error) -> SalonError {
    if let sqlx::Error::Database(ref db) = err {
        if db.code().as_deref() == Some("23P01") {
            return SalonError::Conflict(
                "Employee already has an appointment in that time range".to_string(),
            );
        }
    }
    db_err(err)
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, customer_id, salon_id, employee_id, service_id, date,
               start_time, end_time, status, reminder_sent_at, created_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

pub async fn list_appointments_by_customer(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, customer_id, salon_id, employee_id, service_id, date,
               start_time, end_time, status, reminder_sent_at, created_at
        FROM appointments
        WHERE customer_id = $1
        ORDER BY date ASC, start_time ASC
        "#,
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn list_appointments_by_salon(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, customer_id, salon_id, employee_id, service_id, date,
               start_time, end_time, status, reminder_sent_at, created_at
        FROM appointments
        WHERE salon_id = $1
        ORDER BY date ASC, start_time ASC
        "#,
    )
    .bind(salon_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Applies a status transition, rejecting illegal moves with a conflict.
pub async fn update_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    to: AppointmentStatus,
) -> SalonResult<DbAppointment> {
    let mut tx = pool.begin().await.map_err(db_err)?;

    let current = sqlx::query_scalar::<_, String>(
        r#"
        SELECT status
        FROM appointments
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_err)?
    .ok_or_else(|| SalonError::NotFound(format!("Appointment with ID {} not found", id)))?;

    let from = AppointmentStatus::from_str(&current)?;
    if !scheduling::can_transition(from, to) {
        return Err(SalonError::Conflict(format!(
            "Cannot move appointment from {} to {}",
            from, to
        )));
    }

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET status = $2
        WHERE id = $1
        RETURNING id, customer_id, salon_id, employee_id, service_id, date,
                  start_time, end_time, status, reminder_sent_at, created_at
        "#,
    )
    .bind(id)
    .bind(to.as_str())
    .fetch_one(&mut *tx)
    .await
    .map_err(db_err)?;

    tx.commit().await.map_err(db_err)?;

    Ok(appointment)
}
