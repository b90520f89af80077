use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/carts/items", post(handlers::carts::add_item))
        .route("/api/carts/active", get(handlers::carts::get_active_cart))
        .route("/api/carts/:id", get(handlers::carts::get_cart))
        .route(
            "/api/carts/:cart_id/items/:item_id",
            delete(handlers::carts::remove_item),
        )
}
