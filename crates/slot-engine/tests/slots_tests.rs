//! Tests for candidate slot generation.

use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use slot_engine::busy::{BusyInterval, BusyIntervals};
use slot_engine::slots::{generate_slots, has_allowed_slot, CandidateSlot};
use slot_engine::weekly::{DayAvailability, TimeInterval, WeeklyAvailability};
use slot_engine::{EngineConfig, SlotContext};

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

/// A context two weeks before the test dates, so lead time never interferes.
fn early_ctx() -> SlotContext {
    SlotContext::at(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(), Tz::UTC)
}

fn schedule(day: &str, intervals: &[(&str, &str)]) -> WeeklyAvailability {
    WeeklyAvailability::new(vec![DayAvailability {
        day_of_week: day.to_string(),
        time_slots: intervals
            .iter()
            .map(|(s, e)| TimeInterval::new(*s, *e))
            .collect(),
    }])
}

fn busy(intervals: &[(i64, i64)]) -> BusyIntervals {
    intervals
        .iter()
        .map(|(s, e)| BusyInterval::new(*s, *e))
        .collect()
}

fn starts(slots: &[CandidateSlot]) -> Vec<&str> {
    slots.iter().map(|s| s.start.as_str()).collect()
}

// ── Step granularity ────────────────────────────────────────────────────────

#[test]
fn thirty_minute_service_steps_every_five_minutes() {
    let availability = schedule("Mon", &[("09:00", "10:00")]);

    let slots = generate_slots(&availability, monday(), 30, &BusyIntervals::empty(), &early_ctx());

    assert_eq!(
        starts(&slots),
        vec!["09:00", "09:05", "09:10", "09:15", "09:20", "09:25", "09:30"]
    );
    assert_eq!(slots[0].end, "09:30");
    assert_eq!(slots[6].end, "10:00");
    assert!(slots.iter().all(|s| !s.busy));
}

#[test]
fn step_is_independent_of_duration() {
    let availability = schedule("Mon", &[("09:00", "11:00")]);

    let slots = generate_slots(&availability, monday(), 90, &BusyIntervals::empty(), &early_ctx());

    // 09:00 .. 09:30 inclusive, every 5 minutes.
    assert_eq!(slots.len(), 7);
    assert_eq!(slots.last().unwrap().start, "09:30");
    assert_eq!(slots.last().unwrap().end, "11:00");
}

#[test]
fn interval_shorter_than_duration_yields_nothing() {
    let availability = schedule("Mon", &[("09:00", "09:20")]);

    let slots = generate_slots(&availability, monday(), 30, &BusyIntervals::empty(), &early_ctx());

    assert!(slots.is_empty());
}

// ── Weekday lookup ──────────────────────────────────────────────────────────

#[test]
fn closed_weekday_yields_empty_list() {
    let availability = schedule("Tue", &[("09:00", "17:00")]);

    let slots = generate_slots(&availability, monday(), 30, &BusyIntervals::empty(), &early_ctx());

    assert!(slots.is_empty());
}

#[test]
fn only_first_entry_for_a_weekday_is_used() {
    let availability = WeeklyAvailability::new(vec![
        DayAvailability {
            day_of_week: "Mon".to_string(),
            time_slots: vec![TimeInterval::new("09:00", "09:30")],
        },
        DayAvailability {
            day_of_week: "Mon".to_string(),
            time_slots: vec![TimeInterval::new("14:00", "14:30")],
        },
    ]);

    let slots = generate_slots(&availability, monday(), 30, &BusyIntervals::empty(), &early_ctx());

    assert_eq!(starts(&slots), vec!["09:00"]);
}

// ── Interval order and duplicates ───────────────────────────────────────────

#[test]
fn intervals_are_walked_in_schedule_order() {
    let availability = schedule("Mon", &[("14:00", "14:30"), ("09:00", "09:30")]);

    let slots = generate_slots(&availability, monday(), 30, &BusyIntervals::empty(), &early_ctx());

    assert_eq!(starts(&slots), vec!["14:00", "09:00"]);
}

#[test]
fn overlapping_intervals_keep_duplicate_slots() {
    let availability = schedule("Mon", &[("09:00", "09:40"), ("09:05", "09:40")]);

    let slots = generate_slots(&availability, monday(), 30, &BusyIntervals::empty(), &early_ctx());

    assert_eq!(
        starts(&slots),
        vec!["09:00", "09:05", "09:10", "09:05", "09:10"]
    );
}

// ── Malformed schedule data ─────────────────────────────────────────────────

#[test]
fn malformed_interval_contributes_nothing_but_others_still_count() {
    let availability = schedule("Mon", &[("9h00", "10:00"), ("11:00", "11:30"), ("12:00", "")]);

    let slots = generate_slots(&availability, monday(), 30, &BusyIntervals::empty(), &early_ctx());

    assert_eq!(starts(&slots), vec!["11:00"]);
}

#[test]
fn inverted_and_cross_midnight_intervals_yield_nothing() {
    let availability = schedule("Mon", &[("10:00", "09:00"), ("23:50", "00:30"), ("12:00", "12:00")]);

    let slots = generate_slots(&availability, monday(), 15, &BusyIntervals::empty(), &early_ctx());

    assert!(slots.is_empty());
}

#[test]
fn slot_ending_at_last_minute_of_day() {
    let availability = schedule("Mon", &[("23:00", "23:59")]);

    let slots = generate_slots(&availability, monday(), 59, &BusyIntervals::empty(), &early_ctx());

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].end, "23:59");
}

// ── Occupancy buffer ────────────────────────────────────────────────────────

#[test]
fn buffer_after_slot_collides_with_following_booking() {
    // Existing 30-minute booking 09:00-09:30, stored with its buffer: [540, 600).
    let availability = schedule("Mon", &[("09:31", "12:00")]);
    let busy = busy(&[(540, 600)]);

    let slots = generate_slots(&availability, monday(), 30, &busy, &early_ctx());

    assert_eq!(slots[0].start, "09:31");
    assert_eq!(slots[0].end, "10:01");
    assert!(slots[0].busy, "09:31-10:01 starts inside the 09:00-10:00 occupancy");
}

#[test]
fn buffer_reaching_exactly_to_booking_is_free() {
    // 08:00-08:30 + 30 min buffer ends at 09:00, where the booking starts.
    let availability = schedule("Mon", &[("08:00", "08:35")]);
    let busy = busy(&[(540, 600)]);

    let slots = generate_slots(&availability, monday(), 30, &busy, &early_ctx());

    assert_eq!(starts(&slots), vec!["08:00", "08:05"]);
    assert!(!slots[0].busy);
    assert!(slots[1].busy, "08:05 + 30 + 30 runs to 09:05");
}

#[test]
fn slot_after_busy_end_is_free() {
    let availability = schedule("Mon", &[("10:00", "10:30")]);
    let busy = busy(&[(540, 600)]);

    let slots = generate_slots(&availability, monday(), 30, &busy, &early_ctx());

    assert_eq!(slots.len(), 1);
    assert!(!slots[0].busy);
}

// ── Lead time ───────────────────────────────────────────────────────────────

#[test]
fn lead_time_marks_near_slots_busy() {
    let availability = schedule("Mon", &[("08:55", "09:30")]);
    let ctx = SlotContext::at(Utc.with_ymd_and_hms(2026, 3, 16, 6, 0, 0).unwrap(), Tz::UTC);

    let slots = generate_slots(&availability, monday(), 30, &BusyIntervals::empty(), &ctx);

    assert_eq!(starts(&slots), vec!["08:55", "09:00"]);
    assert!(slots[0].busy, "08:55 is less than 3h after 06:00");
    assert!(!slots[1].busy, "09:00 is exactly 3h after 06:00");
}

#[test]
fn lead_time_follows_context_override() {
    let availability = schedule("Mon", &[("07:00", "07:30")]);
    let ctx = SlotContext::at(Utc.with_ymd_and_hms(2026, 3, 16, 6, 0, 0).unwrap(), Tz::UTC)
        .with_lead_time_hours(1);

    let slots = generate_slots(&availability, monday(), 30, &BusyIntervals::empty(), &ctx);

    assert!(!slots[0].busy);
}

#[test]
fn oversized_configured_lead_time_marks_everything_busy() {
    let availability = schedule("Mon", &[("09:00", "10:00")]);
    let config = EngineConfig::from_json(r#"{"leadTimeHours": 10000000000}"#).unwrap();
    let ctx = early_ctx().with_config(&config);

    let slots = generate_slots(&availability, monday(), 30, &BusyIntervals::empty(), &ctx);

    assert_eq!(slots.len(), 7);
    assert!(slots.iter().all(|s| s.busy));
    assert!(!has_allowed_slot(&availability, monday(), 30, &BusyIntervals::empty(), &ctx));
}

#[test]
fn past_date_is_entirely_busy() {
    let availability = schedule("Mon", &[("09:00", "17:00")]);
    let ctx = SlotContext::at(Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap(), Tz::UTC);

    let slots = generate_slots(&availability, monday(), 60, &BusyIntervals::empty(), &ctx);

    assert!(!slots.is_empty());
    assert!(slots.iter().all(|s| s.busy));
}

// ── Idempotence and short-circuit agreement ─────────────────────────────────

#[test]
fn identical_inputs_give_identical_output() {
    let availability = schedule("Mon", &[("09:00", "12:00"), ("13:00", "18:00")]);
    let busy = busy(&[(600, 660), (840, 900)]);
    let ctx = early_ctx();

    let first = generate_slots(&availability, monday(), 45, &busy, &ctx);
    let second = generate_slots(&availability, monday(), 45, &busy, &ctx);

    assert_eq!(first, second);
}

#[test]
fn has_allowed_slot_agrees_with_generation() {
    let availability = schedule("Mon", &[("09:00", "10:00")]);
    let ctx = early_ctx();

    let blocked = busy(&[(500, 700)]);
    assert!(!has_allowed_slot(&availability, monday(), 30, &blocked, &ctx));
    assert!(generate_slots(&availability, monday(), 30, &blocked, &ctx)
        .iter()
        .all(|s| s.busy));

    let partial = busy(&[(500, 560)]);
    assert!(has_allowed_slot(&availability, monday(), 30, &partial, &ctx));
}

#[test]
fn slot_serializes_with_wire_names() {
    let slot = CandidateSlot {
        start: "09:00".to_string(),
        end: "09:30".to_string(),
        busy: false,
    };
    let json = serde_json::to_string(&slot).unwrap();
    assert_eq!(json, r#"{"start":"09:00","end":"09:30","busy":false}"#);
}
