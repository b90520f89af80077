use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{from_str, json, to_string};
use salonbook_core::models::{
    appointment::{AppointmentStatus, BookAppointmentRequest},
    checkout::{PayAppointmentRequest, PaymentSource},
    user::Role,
};
use uuid::Uuid;

#[test]
fn test_status_serializes_lowercase() {
    assert_eq!(
        to_string(&AppointmentStatus::Booked).unwrap(),
        "\"booked\""
    );
    let status: AppointmentStatus = from_str("\"cancelled\"").unwrap();
    assert_eq!(status, AppointmentStatus::Cancelled);
    assert!(from_str::<AppointmentStatus>("\"unknown\"").is_err());
}

#[test]
fn test_role_round_trip() {
    for role in [Role::Customer, Role::Owner, Role::Admin] {
        let json = to_string(&role).unwrap();
        let back: Role = from_str(&json).unwrap();
        assert_eq!(back, role);
    }
}

#[test]
fn test_book_appointment_request_keeps_raw_start_time() {
    let body = json!({
        "customer_id": Uuid::new_v4(),
        "salon_id": Uuid::new_v4(),
        "employee_id": Uuid::new_v4(),
        "service_id": Uuid::new_v4(),
        "date": "2026-06-15",
        "start_time": "not-a-time"
    });

    // Malformed times must survive deserialization so the handler can
    // answer 400 instead of axum rejecting the body.
    let req: BookAppointmentRequest = serde_json::from_value(body).unwrap();
    assert_eq!(req.start_time, "not-a-time");
    assert_eq!(req.date, NaiveDate::from_ymd_opt(2026, 6, 15).unwrap());
}

#[test]
fn test_payment_source_untagged() {
    let saved = json!({
        "customer_id": Uuid::new_v4(),
        "payment_method_id": Uuid::new_v4(),
        "promo_code": null,
        "voucher_id": null
    });
    let req: PayAppointmentRequest = serde_json::from_value(saved).unwrap();
    assert!(matches!(req.source, PaymentSource::Saved { .. }));

    let raw = json!({
        "customer_id": Uuid::new_v4(),
        "card": {
            "number": "4111111111111111",
            "cvv": "123",
            "exp_month": 12,
            "exp_year": 2028
        },
        "promo_code": "WELCOME10",
        "voucher_id": null
    });
    let req: PayAppointmentRequest = serde_json::from_value(raw).unwrap();
    assert!(matches!(req.source, PaymentSource::Card { .. }));
    assert_eq!(req.promo_code.as_deref(), Some("WELCOME10"));
}
