pub mod admin;
pub mod appointments;
pub mod carts;
pub mod catalog;
pub mod checkout;
pub mod loyalty;
pub mod payment_methods;
pub mod promotions;
pub mod reminders;
pub mod reviews;
pub mod salons;
pub mod users;

use salonbook_core::errors::SalonError;

/// Wraps a driver error into the workspace error taxonomy. Used by the
/// transactional engines, whose other failure modes are domain errors.
pub(crate) fn db_err(err: sqlx::Error) -> SalonError {
    SalonError::Database(err.into())
}
