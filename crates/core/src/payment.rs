//! Payment card validation.
//!
//! No charge is ever made against a real processor; validation here is the
//! gate before an invoice is written. Only the inferred brand and the last
//! four digits are kept after a card passes.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{SalonError, SalonResult};
use crate::models::checkout::CardDetails;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Discover,
}

impl CardBrand {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardBrand::Visa => "visa",
            CardBrand::Mastercard => "mastercard",
            CardBrand::Amex => "amex",
            CardBrand::Discover => "discover",
        }
    }

    /// Valid primary account number lengths for this brand.
    fn valid_lengths(&self) -> &'static [usize] {
        match self {
            CardBrand::Visa => &[13, 16],
            CardBrand::Mastercard => &[16],
            CardBrand::Amex => &[15],
            CardBrand::Discover => &[16],
        }
    }

    fn cvv_length(&self) -> usize {
        match self {
            CardBrand::Amex => 4,
            _ => 3,
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CardBrand {
    type Err = SalonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "visa" => Ok(CardBrand::Visa),
            "mastercard" => Ok(CardBrand::Mastercard),
            "amex" => Ok(CardBrand::Amex),
            "discover" => Ok(CardBrand::Discover),
            other => Err(SalonError::Validation(format!(
                "Unknown card brand: {}",
                other
            ))),
        }
    }
}

/// A card that passed validation. Carries only what storage is allowed
/// to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCard {
    pub brand: CardBrand,
    pub last4: String,
    pub exp_month: u32,
    pub exp_year: i32,
}

/// Infers the card brand from the leading digits of the number.
pub fn infer_brand(number: &str) -> SalonResult<CardBrand> {
    if number.starts_with('4') {
        return Ok(CardBrand::Visa);
    }
    if let Some(prefix) = number.get(..2) {
        if ("51"..="55").contains(&prefix) {
            return Ok(CardBrand::Mastercard);
        }
        if prefix == "34" || prefix == "37" {
            return Ok(CardBrand::Amex);
        }
    }
    if number.starts_with("6011") {
        return Ok(CardBrand::Discover);
    }
    Err(SalonError::Validation(
        "Unrecognized card number prefix".to_string(),
    ))
}

/// Checks that the expiry month/year names a month not before `today`'s.
pub fn check_expiry(exp_month: u32, exp_year: i32, today: NaiveDate) -> SalonResult<()> {
    if !(1..=12).contains(&exp_month) {
        return Err(SalonError::Validation(format!(
            "Invalid expiry month: {}",
            exp_month
        )));
    }
    if exp_year < today.year() || (exp_year == today.year() && exp_month < today.month()) {
        return Err(SalonError::Validation("Card is expired".to_string()));
    }
    Ok(())
}

/// Full card validation: digits only, brand inference, per-brand number and
/// CVV length, expiry not in the past.
pub fn validate_card(card: &CardDetails) -> SalonResult<ValidatedCard> {
    validate_card_at(card, Utc::now().date_naive())
}

pub fn validate_card_at(card: &CardDetails, today: NaiveDate) -> SalonResult<ValidatedCard> {
    let number = card.number.trim();
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(SalonError::Validation(
            "Card number must contain digits only".to_string(),
        ));
    }

    let brand = infer_brand(number)?;

    if !brand.valid_lengths().contains(&number.len()) {
        return Err(SalonError::Validation(format!(
            "Invalid card number length for {}",
            brand
        )));
    }

    let cvv = card.cvv.trim();
    if !cvv.chars().all(|c| c.is_ascii_digit()) || cvv.len() != brand.cvv_length() {
        return Err(SalonError::Validation(format!(
            "Invalid CVV for {}",
            brand
        )));
    }

    check_expiry(card.exp_month, card.exp_year, today)?;

    Ok(ValidatedCard {
        brand,
        last4: number[number.len() - 4..].to_string(),
        exp_month: card.exp_month,
        exp_year: card.exp_year,
    })
}
