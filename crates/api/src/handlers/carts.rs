use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;

use salonbook_core::errors::SalonError;
use salonbook_core::models::cart::{AddCartItemRequest, CartItemResponse, CartResponse};
use salonbook_db::models::{DbCart, DbCartLine};
use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::error_handling::AppError;
use crate::ApiState;

async fn cart_with_lines(pool: &PgPool, cart: DbCart) -> Result<CartResponse, SalonError> {
    let lines = salonbook_db::repositories::carts::get_cart_lines(pool, cart.id)
        .await
        .map_err(SalonError::Database)?;

    Ok(to_response(cart, lines))
}

pub(crate) fn to_response(cart: DbCart, lines: Vec<DbCartLine>) -> CartResponse {
    let subtotal = lines
        .iter()
        .map(|line| line.unit_price * Decimal::from(line.quantity))
        .sum();

    CartResponse {
        id: cart.id,
        customer_id: cart.customer_id,
        salon_id: cart.salon_id,
        status: cart.status,
        items: lines
            .into_iter()
            .map(|line| CartItemResponse {
                id: line.id,
                product_id: line.product_id,
                product_name: line.product_name,
                unit_price: line.unit_price,
                quantity: line.quantity,
            })
            .collect(),
        subtotal,
        created_at: cart.created_at,
    }
}

#[axum::debug_handler]
pub async fn add_item(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<AddCartItemRequest>,
) -> Result<(StatusCode, Json<CartResponse>), AppError> {
    let cart = salonbook_db::repositories::carts::add_item(
        &state.db_pool,
        payload.customer_id,
        payload.product_id,
        payload.quantity,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(cart_with_lines(&state.db_pool, cart).await?),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ActiveCartQuery {
    pub customer_id: Uuid,
    pub salon_id: Uuid,
}

#[axum::debug_handler]
pub async fn get_active_cart(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ActiveCartQuery>,
) -> Result<Json<CartResponse>, AppError> {
    let cart = salonbook_db::repositories::carts::get_active_cart(
        &state.db_pool,
        query.customer_id,
        query.salon_id,
    )
    .await
    .map_err(SalonError::Database)?
    .ok_or_else(|| SalonError::NotFound("No active cart for this salon".to_string()))?;

    Ok(Json(cart_with_lines(&state.db_pool, cart).await?))
}

#[axum::debug_handler]
pub async fn get_cart(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CartResponse>, AppError> {
    let cart = salonbook_db::repositories::carts::get_cart_by_id(&state.db_pool, id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("Cart with ID {} not found", id)))?;

    Ok(Json(cart_with_lines(&state.db_pool, cart).await?))
}

#[axum::debug_handler]
pub async fn remove_item(
    State(state): State<Arc<ApiState>>,
    Path((cart_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    salonbook_db::repositories::carts::remove_item(&state.db_pool, cart_id, item_id).await?;
    Ok(StatusCode::OK)
}
