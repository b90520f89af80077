use axum::response::IntoResponse;
use salonbook_api::middleware::auth;
use salonbook_api::middleware::error_handling::AppError;
use salonbook_core::errors::SalonError;

#[tokio::test]
async fn test_error_handling_not_found() {
    let error = AppError(SalonError::NotFound("Resource not found".to_string()));

    let response = error.into_response();

    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_validation() {
    let error = AppError(SalonError::Validation("Invalid input".to_string()));

    let response = error.into_response();

    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_authentication() {
    let error = AppError(SalonError::Authentication("Invalid password".to_string()));

    let response = error.into_response();

    assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_error_handling_authorization() {
    let error = AppError(SalonError::Authorization("Not authorized".to_string()));

    let response = error.into_response();

    assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_error_handling_conflict() {
    let error = AppError(SalonError::Conflict("Already booked".to_string()));

    let response = error.into_response();

    assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_error_handling_database() {
    let error = AppError(SalonError::Database(eyre::eyre!("Database error")));

    let response = error.into_response();

    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = AppError(SalonError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    ))));

    let response = error.into_response();

    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_hash_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    // The hash must differ from the input and carry the argon2 prefix
    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));
}

#[tokio::test]
async fn test_verify_password_round_trip() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    assert!(auth::verify_password(password, &hashed).unwrap());
    assert!(!auth::verify_password("wrong_password", &hashed).unwrap());
}
