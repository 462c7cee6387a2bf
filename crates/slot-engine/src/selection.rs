//! Initial date selection for the booking page.

use chrono::{Duration, NaiveDate};

use crate::weekly::WeeklyAvailability;

/// The first date in `today..=today + lookahead_days` on an allowed weekday.
pub fn default_date(
    availability: &WeeklyAvailability,
    today: NaiveDate,
    lookahead_days: u32,
) -> Option<NaiveDate> {
    (0..=i64::from(lookahead_days))
        .filter_map(|offset| today.checked_add_signed(Duration::days(offset)))
        .find(|date| availability.is_allowed_weekday(*date))
}

/// Drop a selection whose weekday the service no longer offers.
pub fn retain_if_allowed(availability: &WeeklyAvailability, date: NaiveDate) -> Option<NaiveDate> {
    availability.is_allowed_weekday(date).then_some(date)
}
