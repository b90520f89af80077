use axum::{
    routing::{delete, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/admin/salons/:salon_id/verify",
            post(handlers::admin::verify_salon),
        )
        .route(
            "/api/admin/users/:user_id",
            delete(handlers::admin::remove_user),
        )
}
