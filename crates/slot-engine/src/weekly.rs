//! Weekly availability: per-weekday lists of open intervals.
//!
//! The wire shape mirrors the backend's service document:
//! `[{ "dayOfWeek": "Mon", "timeSlots": [{ "start": "09:00", "end": "13:00" }] }]`.
//! Day labels outside `Mon..Sun` are kept as-is but never match a date.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// The seven day labels, Monday first.
pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// An open interval on a weekday, as 24h `"HH:MM"` clock strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: String,
    pub end: String,
}

impl TimeInterval {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// One weekday's open intervals, in the order the service owner entered them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub day_of_week: String,
    #[serde(default)]
    pub time_slots: Vec<TimeInterval>,
}

impl DayAvailability {
    pub fn new(weekday: Weekday, time_slots: Vec<TimeInterval>) -> Self {
        Self {
            day_of_week: day_label(weekday).to_string(),
            time_slots,
        }
    }

    /// The weekday this entry applies to, or `None` for an unknown label.
    pub fn weekday(&self) -> Option<Weekday> {
        parse_day_label(&self.day_of_week)
    }
}

/// A service's weekly schedule.
///
/// Intervals within a day are neither sorted nor merged; the slot generator
/// walks them in the stored order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyAvailability {
    pub days: Vec<DayAvailability>,
}

impl WeeklyAvailability {
    pub fn new(days: Vec<DayAvailability>) -> Self {
        Self { days }
    }

    /// The first entry whose label matches `weekday`.
    pub fn day(&self, weekday: Weekday) -> Option<&DayAvailability> {
        self.days.iter().find(|d| d.weekday() == Some(weekday))
    }

    /// The open intervals for the weekday `date` falls on (empty when closed).
    pub fn intervals_on(&self, date: NaiveDate) -> &[TimeInterval] {
        self.day(date.weekday())
            .map(|d| d.time_slots.as_slice())
            .unwrap_or(&[])
    }

    /// Weekdays that have an entry, in schedule order. Unknown labels are skipped.
    ///
    /// An entry with an empty interval list still counts: the day is offered in
    /// the date picker even though it yields no slots.
    pub fn allowed_weekdays(&self) -> Vec<Weekday> {
        let mut days = Vec::new();
        for weekday in self.days.iter().filter_map(DayAvailability::weekday) {
            if !days.contains(&weekday) {
                days.push(weekday);
            }
        }
        days
    }

    pub fn is_allowed_weekday(&self, date: NaiveDate) -> bool {
        self.day(date.weekday()).is_some()
    }
}

/// Parse a day label (`"Mon"`..`"Sun"`, case-sensitive).
pub fn parse_day_label(label: &str) -> Option<Weekday> {
    match label {
        "Mon" => Some(Weekday::Mon),
        "Tue" => Some(Weekday::Tue),
        "Wed" => Some(Weekday::Wed),
        "Thu" => Some(Weekday::Thu),
        "Fri" => Some(Weekday::Fri),
        "Sat" => Some(Weekday::Sat),
        "Sun" => Some(Weekday::Sun),
        _ => None,
    }
}

pub fn day_label(weekday: Weekday) -> &'static str {
    DAY_LABELS[weekday.num_days_from_monday() as usize]
}
