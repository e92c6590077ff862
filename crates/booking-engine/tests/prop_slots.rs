//! Property-based tests for slot computation using proptest.
//!
//! These check invariants that hold for any set of occurrences, not just the
//! hand-picked cases in `slots_tests.rs`.

use booking_engine::{compute_available_slots, BookingOccurrence, SlotWindow};
use chrono::{Duration, FixedOffset, NaiveDate, TimeZone};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

/// An occurrence starting somewhere on the target day (or a neighbour),
/// lasting up to 6 hours, written in a whole-hour offset.
fn arb_occurrence() -> impl Strategy<Value = BookingOccurrence> {
    (-1i64..=1, 0i64..24 * 60, 1i64..=360, -5i32..=5).prop_map(
        |(day_shift, start_min, len_min, offset_hours)| {
            let tz = FixedOffset::east_opt(offset_hours * 3600).unwrap();
            let midnight = tz
                .from_local_datetime(&day().and_hms_opt(0, 0, 0).unwrap())
                .unwrap();
            let start = midnight + Duration::days(day_shift) + Duration::minutes(start_min);
            BookingOccurrence::new(start, start + Duration::minutes(len_min))
        },
    )
}

fn arb_window() -> impl Strategy<Value = SlotWindow> {
    (0u32..=12, 0u32..=12, prop_oneof![Just(15u32), Just(30), Just(45), Just(60), Just(90)])
        .prop_map(|(start, span, interval)| SlotWindow::new(start, start + span, interval).unwrap())
}

fn minutes(label: &str) -> i64 {
    let (h, m) = label.split_once(':').unwrap();
    h.parse::<i64>().unwrap() * 60 + m.parse::<i64>().unwrap()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn result_is_an_ordered_subset_of_the_full_day(
        occurrences in prop::collection::vec(arb_occurrence(), 0..8),
        window in arb_window(),
    ) {
        let all = compute_available_slots(&[], day(), &window);
        let free = compute_available_slots(&occurrences, day(), &window);

        prop_assert!(free.iter().all(|s| all.contains(s)));
        prop_assert!(free.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn computation_is_idempotent(
        occurrences in prop::collection::vec(arb_occurrence(), 0..8),
        window in arb_window(),
    ) {
        let first = compute_available_slots(&occurrences, day(), &window);
        let second = compute_available_slots(&occurrences, day(), &window);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn free_slots_never_overlap_a_same_day_occurrence(
        occurrences in prop::collection::vec(arb_occurrence(), 0..8),
        window in arb_window(),
    ) {
        let free = compute_available_slots(&occurrences, day(), &window);
        let interval = i64::from(window.interval_minutes());

        for occ in occurrences.iter().filter(|o| o.start.date_naive() == day()) {
            let midnight = day().and_hms_opt(0, 0, 0).unwrap();
            let start = (occ.start.naive_local() - midnight).num_minutes();
            let end = (occ.end.naive_local() - midnight).num_minutes();
            for slot in &free {
                let s = minutes(&slot.label());
                prop_assert!(
                    s + interval <= start || end <= s,
                    "slot {} overlaps occurrence {:?}", slot, occ
                );
            }
        }
    }

    #[test]
    fn occurrences_on_other_days_change_nothing(
        occurrences in prop::collection::vec(arb_occurrence(), 0..8),
        window in arb_window(),
    ) {
        let same_day: Vec<BookingOccurrence> = occurrences
            .iter()
            .filter(|o| o.start.date_naive() == day())
            .cloned()
            .collect();
        prop_assert_eq!(
            compute_available_slots(&occurrences, day(), &window),
            compute_available_slots(&same_day, day(), &window)
        );
    }
}
