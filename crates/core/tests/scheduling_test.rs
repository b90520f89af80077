use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use rstest::rstest;
use salonbook_core::models::appointment::AppointmentStatus;
use salonbook_core::scheduling::{
    can_transition, day_of_week, end_time, parse_start_time, ranges_overlap, slot_covers,
};

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn test_parse_start_time() {
    assert_eq!(parse_start_time("09:00").unwrap(), t(9, 0));
    assert_eq!(parse_start_time("23:45").unwrap(), t(23, 45));
    assert!(parse_start_time("9am").is_err());
    assert!(parse_start_time("25:00").is_err());
    assert!(parse_start_time("").is_err());
}

#[test]
fn test_end_time_from_duration() {
    assert_eq!(end_time(t(9, 0), 30).unwrap(), t(9, 30));
    assert_eq!(end_time(t(9, 15), 45).unwrap(), t(10, 0));
    assert!(end_time(t(9, 0), 0).is_err());
    assert!(end_time(t(9, 0), -15).is_err());
    // 23:30 + 60min wraps past midnight
    assert!(end_time(t(23, 30), 60).is_err());
}

#[rstest]
// The documented conflict: 09:00-09:30 vs 09:15-09:45.
#[case(t(9, 0), t(9, 30), t(9, 15), t(9, 45), true)]
#[case(t(9, 0), t(9, 30), t(9, 30), t(10, 0), false)] // back-to-back is fine
#[case(t(9, 0), t(9, 30), t(8, 0), t(9, 0), false)]
#[case(t(9, 0), t(10, 0), t(9, 15), t(9, 45), true)] // containment
#[case(t(9, 15), t(9, 45), t(9, 0), t(10, 0), true)] // contained
#[case(t(9, 0), t(9, 30), t(10, 0), t(10, 30), false)]
fn test_ranges_overlap(
    #[case] a_start: NaiveTime,
    #[case] a_end: NaiveTime,
    #[case] b_start: NaiveTime,
    #[case] b_end: NaiveTime,
    #[case] expected: bool,
) {
    assert_eq!(ranges_overlap(a_start, a_end, b_start, b_end), expected);
    // Overlap is symmetric.
    assert_eq!(ranges_overlap(b_start, b_end, a_start, a_end), expected);
}

#[rstest]
#[case(t(9, 0), t(17, 0), t(9, 0), t(9, 30), true)]
#[case(t(9, 0), t(17, 0), t(16, 30), t(17, 0), true)]
#[case(t(9, 0), t(17, 0), t(8, 45), t(9, 15), false)] // starts before the window
#[case(t(9, 0), t(17, 0), t(16, 45), t(17, 15), false)] // runs past the window
fn test_slot_covers(
    #[case] slot_start: NaiveTime,
    #[case] slot_end: NaiveTime,
    #[case] start: NaiveTime,
    #[case] end: NaiveTime,
    #[case] expected: bool,
) {
    assert_eq!(slot_covers(slot_start, slot_end, start, end), expected);
}

#[test]
fn test_day_of_week_monday_based() {
    // 2026-06-15 is a Monday.
    assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()), 0);
    assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2026, 6, 21).unwrap()), 6);
}

#[rstest]
#[case(AppointmentStatus::Booked, AppointmentStatus::Confirmed, true)]
#[case(AppointmentStatus::Booked, AppointmentStatus::Paid, true)] // payment without prior confirmation
#[case(AppointmentStatus::Booked, AppointmentStatus::Cancelled, true)]
#[case(AppointmentStatus::Confirmed, AppointmentStatus::Paid, true)]
#[case(AppointmentStatus::Paid, AppointmentStatus::Completed, true)]
#[case(AppointmentStatus::Paid, AppointmentStatus::Cancelled, true)]
#[case(AppointmentStatus::Booked, AppointmentStatus::Completed, false)]
#[case(AppointmentStatus::Completed, AppointmentStatus::Cancelled, false)]
#[case(AppointmentStatus::Cancelled, AppointmentStatus::Booked, false)]
#[case(AppointmentStatus::Paid, AppointmentStatus::Confirmed, false)]
fn test_status_transitions(
    #[case] from: AppointmentStatus,
    #[case] to: AppointmentStatus,
    #[case] expected: bool,
) {
    assert_eq!(can_transition(from, to), expected);
}
