use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/salons/:salon_id/loyalty-programs",
            post(handlers::loyalty::create_program),
        )
        .route(
            "/api/salons/:salon_id/loyalty-programs",
            get(handlers::loyalty::list_programs),
        )
        .route("/api/loyalty/claim", post(handlers::loyalty::claim_voucher))
        .route("/api/loyalty/points", get(handlers::loyalty::get_points))
        .route(
            "/api/loyalty/vouchers/:customer_id",
            get(handlers::loyalty::list_vouchers),
        )
}
