use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/salons/:salon_id/promotions",
            post(handlers::promotions::create_promotion),
        )
        .route(
            "/api/salons/:salon_id/promotions",
            get(handlers::promotions::list_promotions),
        )
        .route(
            "/api/salons/:salon_id/promotions/:promotion_id/deactivate",
            put(handlers::promotions::deactivate_promotion),
        )
}
