//! Checkout pricing math.
//!
//! All money flows through `rust_decimal::Decimal`; nothing here touches
//! floats. Totals round to cents half-away-from-zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SalonError;

/// Sales tax applied to appointment payments.
pub const APPOINTMENT_TAX_RATE: Decimal = Decimal::from_parts(8875, 0, 0, false, 5);

/// Sales tax applied to product cart checkout.
///
/// Historically this path has charged a different rate than appointment
/// payments. The discrepancy is kept visible here rather than unified;
/// changing either constant changes customer-facing totals.
pub const CART_TAX_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Percentage,
    Flat,
}

impl DiscountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountKind::Percentage => "percentage",
            DiscountKind::Flat => "flat",
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountKind {
    type Err = SalonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(DiscountKind::Percentage),
            "flat" => Ok(DiscountKind::Flat),
            other => Err(SalonError::Validation(format!(
                "Unknown discount kind: {}",
                other
            ))),
        }
    }
}

/// A discount resolved from a promo code or loyalty voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discount {
    pub kind: DiscountKind,
    /// Percentage (0-100) for `Percentage`, a dollar amount for `Flat`.
    pub value: Decimal,
}

/// A fully computed checkout price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub subtotal: Decimal,
    pub discount: Decimal,
    /// Subtotal after discount; the base for tax and loyalty points.
    pub discounted_subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the discount amount against `subtotal`, clamped to
/// `[0, subtotal]`.
pub fn discount_amount(subtotal: Decimal, discount: Option<Discount>) -> Decimal {
    let raw = match discount {
        Some(Discount {
            kind: DiscountKind::Percentage,
            value,
        }) => subtotal * value / Decimal::ONE_HUNDRED,
        Some(Discount {
            kind: DiscountKind::Flat,
            value,
        }) => value,
        None => Decimal::ZERO,
    };
    to_cents(raw.clamp(Decimal::ZERO, subtotal))
}

/// Prices a checkout: applies the discount, then tax, then rounds the
/// total to cents.
pub fn quote(subtotal: Decimal, discount: Option<Discount>, tax_rate: Decimal) -> Quote {
    let discount = discount_amount(subtotal, discount);
    let discounted_subtotal = subtotal - discount;
    let tax = to_cents(discounted_subtotal * tax_rate);
    let total = to_cents(discounted_subtotal + tax);

    Quote {
        subtotal,
        discount,
        discounted_subtotal,
        tax,
        total,
    }
}

/// Loyalty points for a payment: one point per whole dollar of the
/// discounted subtotal, scaled by the salon's configured rate.
pub fn points_earned(discounted_subtotal: Decimal, points_per_dollar: i64) -> i64 {
    let whole_dollars = discounted_subtotal.floor().to_i64().unwrap_or(0).max(0);
    whole_dollars * points_per_dollar.max(0)
}
