use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Adds a product to the customer's active cart at the product's salon,
/// creating the cart if none exists. Re-adding a product bumps its quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCartItemRequest {
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub salon_id: Uuid,
    pub status: String,
    pub items: Vec<CartItemResponse>,
    pub subtotal: Decimal,
    pub created_at: DateTime<Utc>,
}
