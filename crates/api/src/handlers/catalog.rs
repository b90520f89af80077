use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use std::sync::Arc;

use salonbook_core::errors::SalonError;
use salonbook_core::models::catalog::{
    CreateProductRequest, CreateServiceRequest, ProductResponse, ServiceResponse,
};
use salonbook_db::models::{DbProduct, DbService};
use uuid::Uuid;

use crate::handlers::salons::require_salon_owner;
use crate::middleware::error_handling::AppError;
use crate::ApiState;

fn service_to_response(service: DbService) -> ServiceResponse {
    ServiceResponse {
        id: service.id,
        salon_id: service.salon_id,
        name: service.name,
        price: service.price,
        duration_minutes: service.duration_minutes,
        tags: service.tags,
    }
}

fn product_to_response(product: DbProduct) -> ProductResponse {
    ProductResponse {
        id: product.id,
        salon_id: product.salon_id,
        name: product.name,
        price: product.price,
        stock: product.stock,
    }
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ServiceResponse>), AppError> {
    require_salon_owner(&state.db_pool, salon_id, payload.acting_user_id).await?;

    if payload.price < Decimal::ZERO {
        return Err(AppError(SalonError::Validation(
            "Price must not be negative".to_string(),
        )));
    }
    if payload.duration_minutes <= 0 {
        return Err(AppError(SalonError::Validation(
            "Duration must be positive".to_string(),
        )));
    }

    let service = salonbook_db::repositories::catalog::create_service(
        &state.db_pool,
        salon_id,
        payload.name.trim(),
        payload.price,
        payload.duration_minutes,
        &payload.tags,
    )
    .await
    .map_err(SalonError::Database)?;

    Ok((StatusCode::CREATED, Json(service_to_response(service))))
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    let services =
        salonbook_db::repositories::catalog::list_services_by_salon(&state.db_pool, salon_id)
            .await
            .map_err(SalonError::Database)?;

    Ok(Json(services.into_iter().map(service_to_response).collect()))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceResponse>, AppError> {
    let service = salonbook_db::repositories::catalog::get_service_by_id(&state.db_pool, id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("Service with ID {} not found", id)))?;

    Ok(Json(service_to_response(service)))
}

#[axum::debug_handler]
pub async fn create_product(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    require_salon_owner(&state.db_pool, salon_id, payload.acting_user_id).await?;

    if payload.price < Decimal::ZERO {
        return Err(AppError(SalonError::Validation(
            "Price must not be negative".to_string(),
        )));
    }
    if payload.stock < 0 {
        return Err(AppError(SalonError::Validation(
            "Stock must not be negative".to_string(),
        )));
    }

    let product = salonbook_db::repositories::catalog::create_product(
        &state.db_pool,
        salon_id,
        payload.name.trim(),
        payload.price,
        payload.stock,
    )
    .await
    .map_err(SalonError::Database)?;

    Ok((StatusCode::CREATED, Json(product_to_response(product))))
}

#[axum::debug_handler]
pub async fn get_product(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = salonbook_db::repositories::catalog::get_product_by_id(&state.db_pool, id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("Product with ID {} not found", id)))?;

    Ok(Json(product_to_response(product)))
}

#[axum::debug_handler]
pub async fn list_products(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products =
        salonbook_db::repositories::catalog::list_products_by_salon(&state.db_pool, salon_id)
            .await
            .map_err(SalonError::Database)?;

    Ok(Json(products.into_iter().map(product_to_response).collect()))
}
