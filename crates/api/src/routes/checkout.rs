use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments/:appointment_id/pay",
            post(handlers::checkout::pay_appointment),
        )
        .route(
            "/api/carts/:cart_id/checkout",
            post(handlers::checkout::checkout_cart),
        )
        .route("/api/invoices/:id", get(handlers::checkout::get_invoice))
        .route(
            "/api/payment-methods",
            post(handlers::checkout::save_payment_method),
        )
        .route(
            "/api/customers/:customer_id/payment-methods",
            get(handlers::checkout::list_payment_methods),
        )
}
