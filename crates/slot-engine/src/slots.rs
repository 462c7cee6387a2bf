//! Candidate slot generation for one date.
//!
//! For each open interval of the date's weekday, in schedule order, a cursor
//! walks from the interval start in 5-minute steps and emits a slot of the
//! requested duration while it still fits. Slots therefore overlap densely
//! rather than tiling the interval: a 30-minute service in 09:00-10:00 offers
//! 09:00, 09:05, ... 09:30.
//!
//! Each slot is checked against the busy set using its occupancy window, the
//! slot extended by a 30-minute buffer after its end. A slot is `busy` when that
//! window overlaps a reservation or when it starts inside the lead time.
//!
//! Overlapping intervals in the schedule produce duplicate or overlapping
//! slots. They are kept, in generation order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::busy::BusyIntervals;
use crate::clock::{format_minutes, time_to_minutes};
use crate::context::SlotContext;
use crate::lead_time::is_slot_at_least_n_hours_ahead;
use crate::weekly::{TimeInterval, WeeklyAvailability};

/// Distance between consecutive candidate starts, independent of duration.
pub const SLOT_STEP_MINUTES: u32 = 5;

/// Cleanup/travel time appended to every slot before conflict checks.
pub const OCCUPANCY_BUFFER_MINUTES: u32 = 30;

/// A selectable appointment window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSlot {
    pub start: String,
    pub end: String,
    pub busy: bool,
}

/// The occupancy window `[start, start + duration + buffer)` in minutes.
pub fn occupancy_window(start_min: u32, duration: u32) -> (i64, i64) {
    let start = i64::from(start_min);
    (
        start,
        start + i64::from(duration) + i64::from(OCCUPANCY_BUFFER_MINUTES),
    )
}

/// Slot start minutes for one open interval.
///
/// Yields nothing for a malformed interval, an interval whose start is not
/// before its end (including cross-midnight ones), or a zero duration.
pub fn interval_starts(interval: &TimeInterval, duration: u32) -> impl Iterator<Item = u32> {
    let bounds = match (time_to_minutes(&interval.start), time_to_minutes(&interval.end)) {
        (Some(start), Some(end)) if duration > 0 && start < end => Some((start, end)),
        _ => None,
    };
    bounds
        .into_iter()
        .flat_map(move |(start, end)| {
            (start..end)
                .step_by(SLOT_STEP_MINUTES as usize)
                .take_while(move |cursor| cursor.checked_add(duration).is_some_and(|e| e <= end))
        })
}

fn classify(
    start_min: u32,
    duration: u32,
    date: NaiveDate,
    busy: &BusyIntervals,
    ctx: &SlotContext,
) -> CandidateSlot {
    let start = format_minutes(i64::from(start_min));
    let end = format_minutes(i64::from(start_min + duration));
    let (occ_start, occ_end) = occupancy_window(start_min, duration);
    let conflict = busy.overlaps(occ_start, occ_end);
    let allowed = !conflict
        && is_slot_at_least_n_hours_ahead(&start, ctx.lead_time_hours, date, &ctx.timezone, ctx.now);
    CandidateSlot {
        start,
        end,
        busy: !allowed,
    }
}

/// Generate every candidate slot for `date`.
///
/// Returns an empty list when the weekday has no entry in `availability`.
pub fn generate_slots(
    availability: &WeeklyAvailability,
    date: NaiveDate,
    duration: u32,
    busy: &BusyIntervals,
    ctx: &SlotContext,
) -> Vec<CandidateSlot> {
    let slots: Vec<CandidateSlot> = availability
        .intervals_on(date)
        .iter()
        .flat_map(|interval| interval_starts(interval, duration))
        .map(|start| classify(start, duration, date, busy, ctx))
        .collect();

    tracing::debug!(
        %date,
        duration,
        total = slots.len(),
        free = slots.iter().filter(|s| !s.busy).count(),
        "generated slots"
    );
    slots
}

/// True if at least one slot on `date` is free. Stops at the first one.
pub fn has_allowed_slot(
    availability: &WeeklyAvailability,
    date: NaiveDate,
    duration: u32,
    busy: &BusyIntervals,
    ctx: &SlotContext,
) -> bool {
    availability
        .intervals_on(date)
        .iter()
        .flat_map(|interval| interval_starts(interval, duration))
        .any(|start| !classify(start, duration, date, busy, ctx).busy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_start_fits_exactly() {
        let starts: Vec<u32> = interval_starts(&TimeInterval::new("09:00", "10:00"), 60).collect();
        assert_eq!(starts, vec![540]);
    }

    #[test]
    fn inverted_interval_yields_nothing() {
        let starts: Vec<u32> = interval_starts(&TimeInterval::new("23:50", "00:30"), 15).collect();
        assert!(starts.is_empty());
    }

    #[test]
    fn zero_duration_yields_nothing() {
        let starts: Vec<u32> = interval_starts(&TimeInterval::new("09:00", "10:00"), 0).collect();
        assert!(starts.is_empty());
    }

    #[test]
    fn occupancy_includes_buffer() {
        assert_eq!(occupancy_window(540, 30), (540, 600));
    }
}
