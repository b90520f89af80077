use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw card fields as submitted at checkout. Never persisted; only the
/// inferred brand and last four digits survive into storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDetails {
    pub number: String,
    pub cvv: String,
    pub exp_month: u32,
    pub exp_year: i32,
}

/// Either a previously saved card or raw card fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentSource {
    Saved { payment_method_id: Uuid },
    Card { card: CardDetails },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayAppointmentRequest {
    pub customer_id: Uuid,
    #[serde(flatten)]
    pub source: PaymentSource,
    pub promo_code: Option<String>,
    pub voucher_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutCartRequest {
    pub customer_id: Uuid,
    #[serde(flatten)]
    pub source: PaymentSource,
    pub promo_code: Option<String>,
    pub voucher_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLineItemResponse {
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub salon_id: Uuid,
    pub source: String,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub card_brand: String,
    pub card_last4: String,
    pub status: String,
    pub points_awarded: i64,
    pub line_items: Vec<InvoiceLineItemResponse>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePaymentMethodRequest {
    pub customer_id: Uuid,
    pub card: CardDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub brand: String,
    pub last4: String,
    pub exp_month: i32,
    pub exp_year: i32,
}
