//! # Salonbook Core
//!
//! Domain types and pure business logic for the salonbook marketplace.
//! Everything here is side-effect free: card validation, pricing math,
//! schedule overlap checks, and the request/response models shared by the
//! API and database crates.

/// Error taxonomy shared across the workspace
pub mod errors;
/// Request/response and domain models, one module per resource
pub mod models;
/// Payment card validation (brand inference, length, CVV, expiry)
pub mod payment;
/// Checkout pricing: discounts, tax, totals, loyalty point accrual
pub mod pricing;
/// Appointment time math: overlap predicate, slot coverage, status transitions
pub mod scheduling;
