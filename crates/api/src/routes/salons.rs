use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/salons", post(handlers::salons::create_salon))
        .route("/api/salons", get(handlers::salons::list_salons))
        .route("/api/salons/:id", get(handlers::salons::get_salon))
        .route(
            "/api/salons/:salon_id/employees",
            post(handlers::salons::create_employee),
        )
        .route(
            "/api/salons/:salon_id/employees",
            get(handlers::salons::list_employees),
        )
        .route("/api/time-slots", post(handlers::salons::create_time_slot))
        .route(
            "/api/employees/:employee_id/time-slots",
            get(handlers::salons::list_time_slots),
        )
        .route(
            "/api/salons/:salon_id/reviews",
            post(handlers::salons::create_review),
        )
        .route(
            "/api/salons/:salon_id/reviews",
            get(handlers::salons::list_reviews),
        )
}
