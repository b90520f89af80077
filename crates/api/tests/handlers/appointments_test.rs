use chrono::{NaiveDate, NaiveTime, Utc};
use mockall::predicate;
use salonbook_core::errors::SalonError;
use salonbook_core::models::appointment::{AppointmentStatus, BookAppointmentRequest};
use salonbook_core::scheduling;
use salonbook_db::models::{DbAppointment, DbSalon};
use uuid::Uuid;

use crate::test_utils::TestContext;
use salonbook_api::handlers::salons::owner_permission;
use salonbook_api::middleware::error_handling::AppError;

// Wrapper that mirrors the booking handler: parse the start time first,
// then hand off to the repository.
async fn test_book_wrapper(
    ctx: &mut TestContext,
    request: BookAppointmentRequest,
) -> Result<DbAppointment, AppError> {
    let start_time = scheduling::parse_start_time(&request.start_time)?;

    let appointment = ctx
        .appointment_repo
        .book(
            request.customer_id,
            request.salon_id,
            request.employee_id,
            request.service_id,
            request.date,
            start_time,
        )
        .await?;

    Ok(appointment)
}

fn booked_row(
    customer_id: Uuid,
    salon_id: Uuid,
    employee_id: Uuid,
    service_id: Uuid,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> DbAppointment {
    DbAppointment {
        id: Uuid::new_v4(),
        customer_id,
        salon_id,
        employee_id,
        service_id,
        date,
        start_time: start,
        end_time: end,
        status: "booked".to_string(),
        reminder_sent_at: None,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_book_appointment_success() {
    let mut ctx = TestContext::new();
    let customer_id = Uuid::new_v4();
    let salon_id = Uuid::new_v4();
    let employee_id = Uuid::new_v4();
    let service_id = Uuid::new_v4();
    let date = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
    let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    let end = NaiveTime::from_hms_opt(9, 30, 0).unwrap();

    ctx.appointment_repo
        .expect_book()
        .with(
            predicate::eq(customer_id),
            predicate::eq(salon_id),
            predicate::eq(employee_id),
            predicate::eq(service_id),
            predicate::eq(date),
            predicate::eq(start),
        )
        .times(1)
        .returning(move |customer_id, salon_id, employee_id, service_id, date, start_time| {
            Ok(booked_row(
                customer_id,
                salon_id,
                employee_id,
                service_id,
                date,
                start_time,
                end,
            ))
        });

    let request = BookAppointmentRequest {
        customer_id,
        salon_id,
        employee_id,
        service_id,
        date,
        start_time: "09:00".to_string(),
    };

    let appointment = test_book_wrapper(&mut ctx, request).await.unwrap();
    assert_eq!(appointment.status, "booked");
    assert_eq!(appointment.start_time, start);
    assert_eq!(appointment.end_time, end);
}

#[tokio::test]
async fn test_book_appointment_malformed_time() {
    let mut ctx = TestContext::new();

    // The repository must never be reached on a malformed time string
    ctx.appointment_repo.expect_book().times(0);

    let request = BookAppointmentRequest {
        customer_id: Uuid::new_v4(),
        salon_id: Uuid::new_v4(),
        employee_id: Uuid::new_v4(),
        service_id: Uuid::new_v4(),
        date: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
        start_time: "quarter past nine".to_string(),
    };

    let result = test_book_wrapper(&mut ctx, request).await;
    match result.unwrap_err().0 {
        SalonError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_book_appointment_overlap_conflict() {
    let mut ctx = TestContext::new();

    ctx.appointment_repo
        .expect_book()
        .times(1)
        .returning(|_, _, _, _, _, _| {
            Err(SalonError::Conflict(
                "Employee already booked for this time".to_string(),
            ))
        });

    let request = BookAppointmentRequest {
        customer_id: Uuid::new_v4(),
        salon_id: Uuid::new_v4(),
        employee_id: Uuid::new_v4(),
        service_id: Uuid::new_v4(),
        date: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
        start_time: "09:15".to_string(),
    };

    let result = test_book_wrapper(&mut ctx, request).await;
    match result.unwrap_err().0 {
        SalonError::Conflict(_) => {}
        e => panic!("Expected Conflict error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_update_status_illegal_transition() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    // A completed appointment cannot go back to booked; the repository
    // surfaces that as a conflict.
    ctx.appointment_repo
        .expect_update_status()
        .with(predicate::eq(id), predicate::eq(AppointmentStatus::Booked))
        .times(1)
        .returning(|_, _| {
            Err(SalonError::Conflict(
                "Cannot change status from completed to booked".to_string(),
            ))
        });

    let result = ctx
        .appointment_repo
        .update_status(id, AppointmentStatus::Booked)
        .await;

    match result.unwrap_err() {
        SalonError::Conflict(_) => {}
        e => panic!("Expected Conflict error, got: {:?}", e),
    }
}

#[test]
fn test_owner_permission_keeps_database_failures() {
    // Not owning the salon is a plain "no".
    assert!(
        !owner_permission(Err(SalonError::Authorization("not yours".to_string()))).unwrap()
    );
    assert!(!owner_permission(Err(SalonError::NotFound("no salon".to_string()))).unwrap());

    let salon = DbSalon {
        id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        name: "Clip Joint".to_string(),
        address: "1 Main St".to_string(),
        verification_status: "approved".to_string(),
        points_per_dollar: 1,
        created_at: Utc::now(),
    };
    assert!(owner_permission(Ok(salon)).unwrap());

    // A lookup failure must not be mistaken for "not the owner".
    let err = owner_permission(Err(SalonError::Database(eyre::eyre!("connection reset"))))
        .unwrap_err();
    match err {
        SalonError::Database(_) => {}
        e => panic!("Expected Database error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_get_appointment_not_found() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.appointment_repo
        .expect_get_appointment_by_id()
        .with(predicate::eq(id))
        .returning(|_| Ok(None));

    let result = ctx.appointment_repo.get_appointment_by_id(id).await.unwrap();
    assert!(result.is_none());
}
