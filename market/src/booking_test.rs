use time::macros::date;

use super::*;

// Friday.
const TODAY: Date = date!(2026-10-16);
const MONDAY: Date = date!(2026-10-19);

fn at_time_step() -> BookingAttempt {
    let mut attempt = BookingAttempt::open("1");
    attempt.select_date(MONDAY, TODAY).unwrap();
    attempt.continue_to_time().unwrap();
    attempt
}

// =============================================================
// Opening
// =============================================================

#[test]
fn open_starts_on_date_step_with_nothing_selected() {
    let attempt = BookingAttempt::open("7");
    assert_eq!(attempt.professional_id(), "7");
    assert_eq!(attempt.step(), BookingStep::Date);
    assert!(attempt.date().is_none());
    assert!(attempt.time().is_none());
    assert!(attempt.request().is_none());
    assert!(!attempt.can_continue());
    assert!(!attempt.can_confirm());
}

// =============================================================
// Date step
// =============================================================

#[test]
fn continue_without_date_is_rejected_and_state_unchanged() {
    let mut attempt = BookingAttempt::open("1");
    let before = attempt.clone();
    assert_eq!(attempt.continue_to_time(), Err(BookingError::MissingDate));
    assert_eq!(attempt, before);
}

#[test]
fn selecting_a_date_does_not_auto_advance() {
    let mut attempt = BookingAttempt::open("1");
    attempt.select_date(MONDAY, TODAY).unwrap();
    assert_eq!(attempt.step(), BookingStep::Date);
    assert!(attempt.can_continue());
}

#[test]
fn date_then_continue_moves_to_time() {
    let mut attempt = BookingAttempt::open("1");
    attempt.select_date(MONDAY, TODAY).unwrap();
    assert_eq!(attempt.continue_to_time(), Ok(BookingStep::Time));
    assert_eq!(attempt.date(), Some(MONDAY));
}

#[test]
fn today_is_selectable_unless_sunday() {
    assert!(is_date_selectable(TODAY, TODAY));
    let sunday = date!(2026-10-18);
    assert!(!is_date_selectable(sunday, sunday));
}

#[test]
fn past_dates_are_rejected() {
    let mut attempt = BookingAttempt::open("1");
    let yesterday = date!(2026-10-15);
    assert_eq!(attempt.select_date(yesterday, TODAY), Err(BookingError::DateUnavailable(yesterday)));
    assert!(attempt.date().is_none());
}

#[test]
fn sundays_are_rejected() {
    let mut attempt = BookingAttempt::open("1");
    let err = attempt.select_date(date!(2026-10-18), TODAY).unwrap_err();
    assert_eq!(err.error_code(), "E_BOOKING_DATE_UNAVAILABLE");
}

#[test]
fn dates_beyond_one_year_are_rejected() {
    assert!(is_date_selectable(date!(2027-10-16), TODAY));
    assert!(!is_date_selectable(date!(2027-10-18), TODAY));
}

#[test]
fn leap_day_window_rolls_to_march_first() {
    assert_eq!(last_bookable_date(date!(2028-02-29)), date!(2029-03-01));
    assert_eq!(last_bookable_date(TODAY), date!(2027-10-16));
}

#[test]
fn rejected_date_keeps_previous_selection() {
    let mut attempt = BookingAttempt::open("1");
    attempt.select_date(MONDAY, TODAY).unwrap();
    assert!(attempt.select_date(date!(2026-10-18), TODAY).is_err());
    assert_eq!(attempt.date(), Some(MONDAY));
}

// =============================================================
// Time step
// =============================================================

#[test]
fn select_time_outside_time_step_is_rejected() {
    let mut attempt = BookingAttempt::open("1");
    let err = attempt.select_time("10:00").unwrap_err();
    assert_eq!(err, BookingError::WrongStep { action: "choose a time", step: BookingStep::Date });
    assert!(attempt.time().is_none());
}

#[test]
fn unknown_slot_is_rejected() {
    let mut attempt = at_time_step();
    assert_eq!(attempt.select_time("14:00"), Err(BookingError::UnknownSlot("14:00".into())));
    assert!(!attempt.can_confirm());
}

#[test]
fn confirm_without_time_is_rejected() {
    let mut attempt = at_time_step();
    let before = attempt.clone();
    assert_eq!(attempt.confirm(), Err(BookingError::MissingTime));
    assert_eq!(attempt, before);
}

#[test]
fn every_offered_slot_is_selectable() {
    for slot in TIME_SLOTS {
        let mut attempt = at_time_step();
        attempt.select_time(slot).unwrap();
        assert_eq!(attempt.time(), Some(slot));
    }
}

#[test]
fn back_returns_to_date_and_keeps_selections() {
    let mut attempt = at_time_step();
    attempt.select_time("17:00").unwrap();
    assert_eq!(attempt.back_to_date(), Ok(BookingStep::Date));
    assert_eq!(attempt.date(), Some(MONDAY));
    assert_eq!(attempt.time(), Some("17:00"));
}

#[test]
fn back_from_date_step_is_rejected() {
    let mut attempt = BookingAttempt::open("1");
    assert!(matches!(attempt.back_to_date(), Err(BookingError::WrongStep { .. })));
}

// =============================================================
// Confirmation
// =============================================================

#[test]
fn confirm_produces_pending_request() {
    let mut attempt = at_time_step();
    attempt.select_time("10:00").unwrap();
    assert!(attempt.can_confirm());

    let request = attempt.confirm().unwrap();
    assert_eq!(attempt.step(), BookingStep::Confirmed);
    assert_eq!(request.professional_id, "1");
    assert_eq!(request.date, MONDAY);
    assert_eq!(request.time, "10:00");
    assert_eq!(request.status, BookingStatus::Pending);
    assert_eq!(attempt.request(), Some(&request));
}

#[test]
fn confirmed_is_terminal() {
    let mut attempt = at_time_step();
    attempt.select_time("10:00").unwrap();
    attempt.confirm().unwrap();
    let before = attempt.clone();

    assert!(attempt.back_to_date().is_err());
    assert!(attempt.continue_to_time().is_err());
    assert!(attempt.select_date(MONDAY, TODAY).is_err());
    assert!(attempt.select_time("11:00").is_err());
    assert!(attempt.confirm().is_err());
    assert_eq!(attempt, before);
    assert!(!attempt.can_continue());
    assert!(!attempt.can_confirm());
}

#[test]
fn reopening_starts_fresh() {
    let mut attempt = at_time_step();
    attempt.select_time("12:00").unwrap();
    drop(attempt);

    let reopened = BookingAttempt::open("1");
    assert_eq!(reopened.step(), BookingStep::Date);
    assert!(reopened.date().is_none());
    assert!(reopened.time().is_none());
}

#[test]
fn each_confirmation_gets_a_fresh_request_id() {
    let mut a = at_time_step();
    a.select_time("09:00").unwrap();
    let mut b = at_time_step();
    b.select_time("09:00").unwrap();
    assert_ne!(a.confirm().unwrap().id, b.confirm().unwrap().id);
}

#[test]
fn status_labels_are_spanish_copy() {
    assert_eq!(BookingStatus::Pending.label(), "Pendiente");
    assert_eq!(BookingStatus::Confirmed.label(), "Confirmada");
    assert_eq!(BookingStatus::Completed.label(), "Completada");
}
