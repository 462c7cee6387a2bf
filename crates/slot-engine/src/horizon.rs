//! Multi-week scan that classifies dates as fully booked.
//!
//! The date picker only offers the service's weekdays inside a fixed window
//! (today + 62 days by default). For each of those dates the scanner walks the
//! slot generator until it finds one free slot; dates where none exists are
//! reported as fully booked and get disabled in the picker.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::busy::BusyCalendar;
use crate::context::SlotContext;
use crate::slots::has_allowed_slot;
use crate::weekly::WeeklyAvailability;

/// Dates in `today..=today + horizon_days` that fall on an allowed weekday,
/// in chronological order.
pub fn candidate_dates(
    availability: &WeeklyAvailability,
    today: NaiveDate,
    horizon_days: u32,
) -> Vec<NaiveDate> {
    (0..=i64::from(horizon_days))
        .filter_map(|offset| today.checked_add_signed(Duration::days(offset)))
        .filter(|date| availability.is_allowed_weekday(*date))
        .collect()
}

/// Classify each of `dates` and return those with no free slot.
///
/// Dates missing from `busy` are scanned with no known conflicts.
pub fn scan_horizon(
    availability: &WeeklyAvailability,
    duration: u32,
    dates: &[NaiveDate],
    busy: &BusyCalendar,
    ctx: &SlotContext,
) -> BTreeSet<NaiveDate> {
    let fully_booked: BTreeSet<NaiveDate> = dates
        .iter()
        .copied()
        .filter(|date| !has_allowed_slot(availability, *date, duration, busy.get(*date), ctx))
        .collect();

    tracing::debug!(
        scanned = dates.len(),
        fully_booked = fully_booked.len(),
        duration,
        "horizon scan complete"
    );
    fully_booked
}

/// First date of `dates` (chronologically) that is not fully booked.
pub fn first_bookable_date(dates: &[NaiveDate], fully_booked: &BTreeSet<NaiveDate>) -> Option<NaiveDate> {
    let mut sorted = dates.to_vec();
    sorted.sort_unstable();
    sorted.into_iter().find(|d| !fully_booked.contains(d))
}

/// Keep the current selection if it is still bookable, otherwise advance to
/// the first bookable date of the scanned range.
///
/// A selection outside `dates`, or no selection at all, is treated the same
/// way as a fully booked one. Returns `None` when every scanned date is fully
/// booked.
pub fn reconcile_selection(
    selected: Option<NaiveDate>,
    dates: &[NaiveDate],
    fully_booked: &BTreeSet<NaiveDate>,
) -> Option<NaiveDate> {
    match selected {
        Some(date) if dates.contains(&date) && !fully_booked.contains(&date) => Some(date),
        _ => {
            let next = first_bookable_date(dates, fully_booked);
            if selected.is_some() && selected != next {
                tracing::debug!(from = ?selected, to = ?next, "advanced selection past fully booked date");
            }
            next
        }
    }
}
