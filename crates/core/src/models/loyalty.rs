use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::DiscountKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLoyaltyProgramRequest {
    pub acting_user_id: Uuid,
    pub name: String,
    pub points_required: i64,
    pub discount_kind: DiscountKind,
    pub discount_value: Decimal,
    /// Restricts redemption to services carrying this tag. None = any.
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyProgramResponse {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub name: String,
    pub points_required: i64,
    pub discount_kind: DiscountKind,
    pub discount_value: Decimal,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimVoucherRequest {
    pub customer_id: Uuid,
    pub program_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub program_id: Uuid,
    pub salon_id: Uuid,
    pub redeemed_at: Option<DateTime<Utc>>,
    pub claimed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsBalanceResponse {
    pub customer_id: Uuid,
    pub salon_id: Uuid,
    pub points_earned: i64,
    pub points_redeemed: i64,
    pub points_available: i64,
}
