//! # Error Handling Middleware
//!
//! Maps domain-specific errors to HTTP status codes and JSON error
//! responses, so every endpoint fails the same way. Based on Axum's error
//! handling mechanisms and the workspace `SalonError` taxonomy.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use salonbook_core::errors::SalonError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps domain-specific `SalonError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub SalonError);

/// Converts application errors to HTTP responses.
///
/// Database and internal errors deliberately return a generic message;
/// the real cause is logged server-side.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            SalonError::NotFound(_) => StatusCode::NOT_FOUND,
            SalonError::Validation(_) => StatusCode::BAD_REQUEST,
            SalonError::Authentication(_) => StatusCode::UNAUTHORIZED,
            SalonError::Authorization(_) => StatusCode::FORBIDDEN,
            SalonError::Conflict(_) => StatusCode::CONFLICT,
            SalonError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SalonError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self.0 {
            SalonError::Database(report) => {
                tracing::error!("Database error: {:?}", report);
                "Internal server error".to_string()
            }
            SalonError::Internal(err) => {
                tracing::error!("Internal error: {:?}", err);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from SalonError to AppError.
///
/// This implementation allows using the `?` operator with functions that
/// return `Result<T, SalonError>` in handler functions that return
/// `Result<T, AppError>`.
impl From<SalonError> for AppError {
    fn from(err: SalonError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError.
///
/// Wraps the eyre error in a `SalonError::Database` variant so that `?`
/// works with repository functions returning `eyre::Result`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SalonError::Database(err))
    }
}
