use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSalon {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub address: String,
    pub verification_status: String,
    pub points_per_dollar: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEmployee {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub duration_minutes: i32,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProduct {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: Option<NaiveDate>,
    pub day_of_week: Option<i16>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub salon_id: Uuid,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub reminder_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCart {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub salon_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Cart line joined with its product name, as rendered in cart views.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCartLine {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbInvoice {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub salon_id: Uuid,
    pub source: String,
    pub appointment_id: Option<Uuid>,
    pub cart_id: Option<Uuid>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub card_brand: String,
    pub card_last4: String,
    pub status: String,
    pub points_awarded: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbInvoiceLineItem {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCustomerPoints {
    pub customer_id: Uuid,
    pub salon_id: Uuid,
    pub points_earned: i64,
    pub points_redeemed: i64,
    pub points_available: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLoyaltyProgram {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub name: String,
    pub points_required: i64,
    pub discount_kind: String,
    pub discount_value: Decimal,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCustomerVoucher {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub program_id: Uuid,
    pub redeemed_at: Option<DateTime<Utc>>,
    pub claimed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPromotion {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub code: String,
    pub discount_kind: String,
    pub discount_value: Decimal,
    pub active: bool,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPaymentMethod {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub brand: String,
    pub last4: String,
    pub exp_month: i32,
    pub exp_year: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReview {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub salon_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
