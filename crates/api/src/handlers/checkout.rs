use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use std::str::FromStr;
use std::sync::Arc;

use salonbook_core::errors::SalonError;
use salonbook_core::models::checkout::{
    CheckoutCartRequest, InvoiceLineItemResponse, InvoiceResponse, PayAppointmentRequest,
    PaymentMethodResponse, PaymentSource, SavePaymentMethodRequest,
};
use salonbook_core::payment::{self, CardBrand, ValidatedCard};
use salonbook_db::models::{DbInvoice, DbInvoiceLineItem};
use salonbook_db::repositories::checkout::CheckoutOutcome;
use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::error_handling::AppError;
use crate::ApiState;

pub(crate) fn to_response(invoice: DbInvoice, line_items: Vec<DbInvoiceLineItem>) -> InvoiceResponse {
    InvoiceResponse {
        id: invoice.id,
        customer_id: invoice.customer_id,
        salon_id: invoice.salon_id,
        source: invoice.source,
        subtotal: invoice.subtotal,
        discount: invoice.discount,
        tax: invoice.tax,
        total: invoice.total,
        card_brand: invoice.card_brand,
        card_last4: invoice.card_last4,
        status: invoice.status,
        points_awarded: invoice.points_awarded,
        line_items: line_items
            .into_iter()
            .map(|item| InvoiceLineItemResponse {
                description: item.description,
                unit_price: item.unit_price,
                quantity: item.quantity,
                line_total: item.line_total,
            })
            .collect(),
        created_at: invoice.created_at,
    }
}

/// Resolves a payment source into a validated card: raw fields go through
/// full validation; a stored reference is checked for ownership and expiry.
async fn resolve_card(
    pool: &PgPool,
    customer_id: Uuid,
    source: &PaymentSource,
) -> Result<ValidatedCard, SalonError> {
    match source {
        PaymentSource::Card { card } => payment::validate_card(card),
        PaymentSource::Saved { payment_method_id } => {
            let method = salonbook_db::repositories::payment_methods::get_payment_method_by_id(
                pool,
                *payment_method_id,
            )
            .await
            .map_err(SalonError::Database)?
            .ok_or_else(|| {
                SalonError::NotFound(format!(
                    "Payment method with ID {} not found",
                    payment_method_id
                ))
            })?;

            if method.customer_id != customer_id {
                return Err(SalonError::Authorization(
                    "Payment method belongs to another customer".to_string(),
                ));
            }

            payment::check_expiry(
                method.exp_month as u32,
                method.exp_year,
                Utc::now().date_naive(),
            )?;

            Ok(ValidatedCard {
                brand: CardBrand::from_str(&method.brand)?,
                last4: method.last4,
                exp_month: method.exp_month as u32,
                exp_year: method.exp_year,
            })
        }
    }
}

#[axum::debug_handler]
pub async fn pay_appointment(
    State(state): State<Arc<ApiState>>,
    Path(appointment_id): Path<Uuid>,
    Json(payload): Json<PayAppointmentRequest>,
) -> Result<(StatusCode, Json<InvoiceResponse>), AppError> {
    let card = resolve_card(&state.db_pool, payload.customer_id, &payload.source).await?;

    let CheckoutOutcome {
        invoice,
        line_items,
    } = salonbook_db::repositories::checkout::pay_appointment(
        &state.db_pool,
        appointment_id,
        payload.customer_id,
        &card,
        payload.promo_code.as_deref(),
        payload.voucher_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(to_response(invoice, line_items))))
}

#[axum::debug_handler]
pub async fn checkout_cart(
    State(state): State<Arc<ApiState>>,
    Path(cart_id): Path<Uuid>,
    Json(payload): Json<CheckoutCartRequest>,
) -> Result<(StatusCode, Json<InvoiceResponse>), AppError> {
    let card = resolve_card(&state.db_pool, payload.customer_id, &payload.source).await?;

    let CheckoutOutcome {
        invoice,
        line_items,
    } = salonbook_db::repositories::checkout::checkout_cart(
        &state.db_pool,
        cart_id,
        payload.customer_id,
        &card,
        payload.promo_code.as_deref(),
        payload.voucher_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(to_response(invoice, line_items))))
}

#[axum::debug_handler]
pub async fn get_invoice(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceResponse>, AppError> {
    let (invoice, line_items) =
        salonbook_db::repositories::checkout::get_invoice_by_id(&state.db_pool, id)
            .await
            .map_err(SalonError::Database)?
            .ok_or_else(|| SalonError::NotFound(format!("Invoice with ID {} not found", id)))?;

    Ok(Json(to_response(invoice, line_items)))
}

#[axum::debug_handler]
pub async fn save_payment_method(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SavePaymentMethodRequest>,
) -> Result<(StatusCode, Json<PaymentMethodResponse>), AppError> {
    let card = payment::validate_card(&payload.card)?;

    let method = salonbook_db::repositories::payment_methods::save_payment_method(
        &state.db_pool,
        payload.customer_id,
        &card,
    )
    .await
    .map_err(SalonError::Database)?;

    Ok((
        StatusCode::CREATED,
        Json(PaymentMethodResponse {
            id: method.id,
            customer_id: method.customer_id,
            brand: method.brand,
            last4: method.last4,
            exp_month: method.exp_month,
            exp_year: method.exp_year,
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_payment_methods(
    State(state): State<Arc<ApiState>>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<Vec<PaymentMethodResponse>>, AppError> {
    let methods = salonbook_db::repositories::payment_methods::list_payment_methods_by_customer(
        &state.db_pool,
        customer_id,
    )
    .await
    .map_err(SalonError::Database)?;

    Ok(Json(
        methods
            .into_iter()
            .map(|m| PaymentMethodResponse {
                id: m.id,
                customer_id: m.customer_id,
                brand: m.brand,
                last4: m.last4,
                exp_month: m.exp_month,
                exp_year: m.exp_year,
            })
            .collect(),
    ))
}
