use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/salons/:salon_id/services",
            post(handlers::catalog::create_service),
        )
        .route(
            "/api/salons/:salon_id/services",
            get(handlers::catalog::list_services),
        )
        .route(
            "/api/salons/:salon_id/products",
            post(handlers::catalog::create_product),
        )
        .route(
            "/api/salons/:salon_id/products",
            get(handlers::catalog::list_products),
        )
        .route("/api/services/:id", get(handlers::catalog::get_service))
        .route("/api/products/:id", get(handlers::catalog::get_product))
}
