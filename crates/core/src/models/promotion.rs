use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::DiscountKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePromotionRequest {
    pub acting_user_id: Uuid,
    pub code: String,
    pub discount_kind: DiscountKind,
    pub discount_value: Decimal,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionResponse {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub code: String,
    pub discount_kind: DiscountKind,
    pub discount_value: Decimal,
    pub active: bool,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}
