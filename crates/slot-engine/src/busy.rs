//! Busy intervals: existing reservations on a date, in minutes from midnight.
//!
//! The backend answers a per-date query with either `{"busyIntervals": [...]}`
//! or the older `{"busySlots": [...]}`; both shapes are accepted. Each entry is
//! `{"startMin": 540, "endMin": 600}` with an exclusive end.
//!
//! ## Fail-open policy
//!
//! A failed fetch yields an EMPTY busy set, so every slot that passes the
//! lead-time check is shown as available. This is deliberate: the backend
//! re-validates the chosen slot when the booking is submitted, and that check
//! is the real guard against double-booking. Do not harden this side.

use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clock::intervals_overlap;

/// A reserved range `[start_min, end_min)` on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyInterval {
    pub start_min: i64,
    pub end_min: i64,
}

impl BusyInterval {
    pub fn new(start_min: i64, end_min: i64) -> Self {
        Self { start_min, end_min }
    }

    /// Normalize one raw payload entry. Returns `None` unless the entry is an
    /// object with numeric `startMin` and `endMin`.
    ///
    /// Fractional minutes are widened outward (start floored, end ceiled). For
    /// integer slot bounds the overlap answer is unchanged by this.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let start = obj.get("startMin")?.as_f64()?;
        let end = obj.get("endMin")?.as_f64()?;
        if !start.is_finite() || !end.is_finite() {
            return None;
        }
        Some(Self {
            start_min: start.floor() as i64,
            end_min: end.ceil() as i64,
        })
    }
}

/// Busy intervals for one date, sorted ascending by `start_min`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusyIntervals {
    intervals: Vec<BusyInterval>,
}

impl BusyIntervals {
    pub fn new(mut intervals: Vec<BusyInterval>) -> Self {
        intervals.sort_by_key(|i| (i.start_min, i.end_min));
        Self { intervals }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalize a per-date payload.
    ///
    /// Accepts `{"busyIntervals": [...]}`, `{"busySlots": [...]}` (used when
    /// `busyIntervals` is absent or null), or a bare array. Malformed entries are
    /// dropped one by one; the rest of the batch is kept.
    pub fn from_payload(payload: &Value) -> Self {
        let raw = match payload {
            Value::Array(items) => Some(items),
            Value::Object(obj) => obj
                .get("busyIntervals")
                .filter(|v| !v.is_null())
                .or_else(|| obj.get("busySlots").filter(|v| !v.is_null()))
                .and_then(Value::as_array),
            _ => None,
        };
        let Some(raw) = raw else {
            return Self::empty();
        };

        let intervals: Vec<BusyInterval> = raw.iter().filter_map(BusyInterval::from_value).collect();
        let dropped = raw.len() - intervals.len();
        if dropped > 0 {
            tracing::warn!(dropped, kept = intervals.len(), "dropped malformed busy-interval entries");
        }
        Self::new(intervals)
    }

    /// Apply the fail-open policy to the outcome of a fetch.
    ///
    /// A successful payload is normalized with [`BusyIntervals::from_payload`]; an
    /// error is logged and replaced by an empty set.
    pub fn from_fetch<E: Display>(result: std::result::Result<Value, E>) -> Self {
        match result {
            Ok(payload) => Self::from_payload(&payload),
            Err(err) => {
                tracing::warn!(error = %err, "busy-interval fetch failed, treating date as free");
                Self::empty()
            }
        }
    }

    /// True if `[start, end)` overlaps any busy interval.
    pub fn overlaps(&self, start: i64, end: i64) -> bool {
        self.intervals
            .iter()
            .any(|b| intervals_overlap(start, end, b.start_min, b.end_min))
    }

    pub fn as_slice(&self) -> &[BusyInterval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

impl FromIterator<BusyInterval> for BusyIntervals {
    fn from_iter<I: IntoIterator<Item = BusyInterval>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Busy intervals for a range of dates, as fetched in batch form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusyCalendar {
    by_date: BTreeMap<NaiveDate, BusyIntervals>,
}

impl BusyCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate, busy: BusyIntervals) {
        self.by_date.insert(date, busy);
    }

    /// Normalize a batch payload keyed by `YYYY-MM-DD`.
    ///
    /// Each value is anything [`BusyIntervals::from_payload`] accepts. Keys that
    /// are not valid dates are dropped; a non-object payload yields an empty
    /// calendar.
    pub fn from_payload(payload: &Value) -> Self {
        let mut calendar = Self::new();
        let Some(obj) = payload.as_object() else {
            return calendar;
        };
        for (key, value) in obj {
            match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
                Ok(date) => calendar.insert(date, BusyIntervals::from_payload(value)),
                Err(_) => tracing::warn!(key = %key, "dropped busy calendar entry with malformed date"),
            }
        }
        calendar
    }

    /// The busy set for `date`. Dates that were never fetched have no known
    /// conflicts.
    pub fn get(&self, date: NaiveDate) -> &BusyIntervals {
        static EMPTY: BusyIntervals = BusyIntervals {
            intervals: Vec::new(),
        };
        self.by_date.get(&date).unwrap_or(&EMPTY)
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

impl FromIterator<(NaiveDate, BusyIntervals)> for BusyCalendar {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, BusyIntervals)>>(iter: I) -> Self {
        Self {
            by_date: iter.into_iter().collect(),
        }
    }
}
