//! Appointment time math.
//!
//! The database backs these checks with an exclusion constraint, but the
//! predicates live here so handlers can produce precise error messages and
//! tests can exercise the rules without a database.

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::errors::{SalonError, SalonResult};
use crate::models::appointment::AppointmentStatus;

/// Parses a booking start time in "HH:MM" form.
pub fn parse_start_time(raw: &str) -> SalonResult<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| SalonError::Validation(format!("Invalid start time: {:?}", raw)))
}

/// Computes the end of a booking from its start and the service duration.
pub fn end_time(start: NaiveTime, duration_minutes: i32) -> SalonResult<NaiveTime> {
    if duration_minutes <= 0 {
        return Err(SalonError::Validation(
            "Service duration must be positive".to_string(),
        ));
    }
    let end = start + chrono::Duration::minutes(i64::from(duration_minutes));
    // Wrapping past midnight means end < start, which the half-open
    // comparisons below cannot represent.
    if end <= start {
        return Err(SalonError::Validation(
            "Appointment may not extend past midnight".to_string(),
        ));
    }
    Ok(end)
}

/// Half-open interval overlap: `[a_start, a_end)` intersects
/// `[b_start, b_end)`.
pub fn ranges_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Whether an availability window covers the whole of `[start, end)`.
pub fn slot_covers(
    slot_start: NaiveTime,
    slot_end: NaiveTime,
    start: NaiveTime,
    end: NaiveTime,
) -> bool {
    slot_start <= start && slot_end >= end
}

/// Day-of-week index used by recurring time slots: 0 = Monday .. 6 = Sunday.
pub fn day_of_week(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_monday() as i16
}

/// Legal appointment status transitions. Payment may follow booking
/// directly or come after confirmation; cancellation is allowed from any
/// non-terminal state; everything else moves strictly forward.
pub fn can_transition(from: AppointmentStatus, to: AppointmentStatus) -> bool {
    use AppointmentStatus::*;
    matches!(
        (from, to),
        (Booked, Confirmed)
            | (Booked, Paid)
            | (Booked, Cancelled)
            | (Confirmed, Paid)
            | (Confirmed, Cancelled)
            | (Paid, Completed)
            | (Paid, Cancelled)
    )
}
