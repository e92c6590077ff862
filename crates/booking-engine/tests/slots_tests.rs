//! Tests for availability-slot computation.

use booking_engine::{
    compute_available_slots, compute_available_slots_from_iso, BookingError, BookingOccurrence,
    SlotWindow, TimeSlot,
};
use chrono::NaiveDate;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn occ(start: &str, end: &str) -> BookingOccurrence {
    BookingOccurrence::parse(start, end).unwrap()
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

fn labels(slots: &[TimeSlot]) -> Vec<String> {
    slots.iter().map(TimeSlot::label).collect()
}

fn free(occurrences: &[BookingOccurrence]) -> Vec<String> {
    labels(&compute_available_slots(occurrences, day(), &SlotWindow::default()))
}

// ── Default window ──────────────────────────────────────────────────────────

#[test]
fn empty_day_is_fully_available() {
    assert_eq!(
        free(&[]),
        vec!["09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00"]
    );
}

#[test]
fn partial_interval_blocks_the_whole_slot() {
    let result = free(&[occ("2026-03-16T09:00:00Z", "2026-03-16T10:30:00Z")]);
    assert_eq!(result, vec!["11:00", "12:00", "13:00", "14:00", "15:00", "16:00"]);
}

#[test]
fn booking_ending_on_a_boundary_blocks_only_its_own_slots() {
    let result = free(&[occ("2026-03-16T13:00:00Z", "2026-03-16T14:00:00Z")]);
    assert!(!result.contains(&"13:00".to_string()));
    assert!(result.contains(&"12:00".to_string()));
    assert!(result.contains(&"14:00".to_string()));
}

#[test]
fn start_is_snapped_down() {
    let result = free(&[occ("2026-03-16T14:45:00Z", "2026-03-16T15:00:00Z")]);
    assert!(!result.contains(&"14:00".to_string()));
    assert!(result.contains(&"15:00".to_string()));
}

#[test]
fn overlapping_bookings_merge() {
    let result = free(&[
        occ("2026-03-16T10:00:00Z", "2026-03-16T12:00:00Z"),
        occ("2026-03-16T11:30:00Z", "2026-03-16T13:00:00Z"),
        occ("2026-03-16T10:00:00Z", "2026-03-16T11:00:00Z"),
    ]);
    assert_eq!(result, vec!["09:00", "13:00", "14:00", "15:00", "16:00"]);
}

#[test]
fn other_dates_are_ignored() {
    let result = free(&[
        occ("2026-03-15T09:00:00Z", "2026-03-15T17:00:00Z"),
        occ("2026-03-17T09:00:00Z", "2026-03-17T17:00:00Z"),
    ]);
    assert_eq!(result.len(), 8);
}

#[test]
fn booking_started_the_day_before_is_ignored() {
    // Filtering is on the start date only.
    let result = free(&[occ("2026-03-15T22:00:00Z", "2026-03-16T12:00:00Z")]);
    assert_eq!(result.len(), 8);
}

#[test]
fn booking_before_the_window_clips_to_the_first_slot() {
    let result = free(&[occ("2026-03-16T07:00:00Z", "2026-03-16T09:20:00Z")]);
    assert_eq!(result.first().map(String::as_str), Some("10:00"));
    assert_eq!(result.len(), 7);
}

#[test]
fn booking_running_past_midnight_blocks_the_evening() {
    let result = free(&[occ("2026-03-16T16:30:00Z", "2026-03-17T02:00:00Z")]);
    assert_eq!(result.last().map(String::as_str), Some("15:00"));
}

#[test]
fn date_and_clock_come_from_the_written_offset() {
    // 11:00 in +02:00 is 09:00Z, but the wall clock reads 11:00.
    let result = free(&[occ("2026-03-16T11:00:00+02:00", "2026-03-16T12:00:00+02:00")]);
    assert!(!result.contains(&"11:00".to_string()));
    assert!(result.contains(&"09:00".to_string()));

    // 23:30 on the 15th at -10:00 is the 16th in UTC; it still belongs to the 15th.
    let result = free(&[occ("2026-03-15T23:30:00-10:00", "2026-03-16T01:00:00-10:00")]);
    assert_eq!(result.len(), 8);
}

#[test]
fn computation_is_idempotent() {
    let occurrences = vec![
        occ("2026-03-16T09:10:00Z", "2026-03-16T09:50:00Z"),
        occ("2026-03-16T14:00:00Z", "2026-03-16T15:30:00Z"),
    ];
    let first = compute_available_slots(&occurrences, day(), &SlotWindow::default());
    let second = compute_available_slots(&occurrences, day(), &SlotWindow::default());
    assert_eq!(first, second);
    assert_eq!(labels(&first), vec!["10:00", "11:00", "12:00", "13:00", "16:00"]);
}

// ── Custom windows ──────────────────────────────────────────────────────────

#[test]
fn half_hour_slots() {
    let window = SlotWindow::new(9, 12, 30).unwrap();
    let slots = compute_available_slots(
        &[occ("2026-03-16T10:15:00Z", "2026-03-16T10:45:00Z")],
        day(),
        &window,
    );
    assert_eq!(labels(&slots), vec!["09:00", "09:30", "11:00", "11:30"]);
}

#[test]
fn uneven_interval_steps_from_the_window_start() {
    let window = SlotWindow::new(9, 12, 45).unwrap();
    let all = compute_available_slots(&[], day(), &window);
    assert_eq!(labels(&all), vec!["09:00", "09:45", "10:30", "11:15"]);

    let slots = compute_available_slots(
        &[occ("2026-03-16T10:00:00Z", "2026-03-16T10:40:00Z")],
        day(),
        &window,
    );
    assert_eq!(labels(&slots), vec!["09:00", "11:15"]);
}

#[test]
fn whole_day_window() {
    let window = SlotWindow::new(0, 24, 60).unwrap();
    let slots = compute_available_slots(&[], day(), &window);
    assert_eq!(slots.len(), 24);
    assert_eq!(slots[23].label(), "23:00");
}

#[test]
fn empty_window_has_no_slots() {
    let window = SlotWindow::new(12, 12, 60).unwrap();
    assert!(compute_available_slots(&[], day(), &window).is_empty());
}

#[test]
fn invalid_windows_are_rejected() {
    assert!(matches!(SlotWindow::new(9, 17, 0), Err(BookingError::InvalidWindow(_))));
    assert!(matches!(SlotWindow::new(9, 25, 60), Err(BookingError::InvalidWindow(_))));
    assert!(matches!(SlotWindow::new(17, 9, 60), Err(BookingError::InvalidWindow(_))));
}

#[test]
fn default_window_is_nine_to_five_hourly() {
    let window = SlotWindow::default();
    assert_eq!(
        (window.start_hour(), window.end_hour(), window.interval_minutes()),
        (9, 17, 60)
    );
}

// ── String input ────────────────────────────────────────────────────────────

#[test]
fn iso_strings_are_parsed() {
    let slots = compute_available_slots_from_iso(
        &[("2026-03-16T09:00:00Z", "2026-03-16T10:30:00Z")],
        day(),
        &SlotWindow::default(),
    )
    .unwrap();
    assert_eq!(slots[0].label(), "11:00");
}

#[test]
fn malformed_timestamp_is_reported() {
    let err = compute_available_slots_from_iso(
        &[("2026-03-16 09:00", "2026-03-16T10:30:00Z")],
        day(),
        &SlotWindow::default(),
    )
    .unwrap_err();
    assert!(matches!(err, BookingError::MalformedInput(_)));
}

#[test]
fn slots_serialize_as_labels() {
    let window = SlotWindow::new(9, 11, 60).unwrap();
    let slots = compute_available_slots(&[], day(), &window);
    assert_eq!(serde_json::to_string(&slots).unwrap(), r#"["09:00","10:00"]"#);
}
