//! The explicit inputs every slot computation depends on besides the schedule:
//! the current instant, the viewer's timezone, and the lead time.
//!
//! [`SlotContext::system`] is the only place that reads the system clock.
//! Callers build a context once per render and pass it down, so generation
//! stays a pure function of its arguments.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::config::{EngineConfig, DEFAULT_LEAD_TIME_HOURS};
use crate::error::{Result, SlotError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotContext {
    /// The instant slot lead time is measured from.
    pub now: DateTime<Utc>,
    /// Timezone in which dates and clock times are interpreted.
    pub timezone: Tz,
    pub lead_time_hours: i64,
}

impl SlotContext {
    /// A context frozen at `now`, with the default lead time.
    pub fn at(now: DateTime<Utc>, timezone: Tz) -> Self {
        Self {
            now,
            timezone,
            lead_time_hours: DEFAULT_LEAD_TIME_HOURS,
        }
    }

    /// A context at the current system time.
    pub fn system(timezone: Tz) -> Self {
        Self::at(Utc::now(), timezone)
    }

    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.lead_time_hours = config.lead_time_hours;
        self
    }

    pub fn with_lead_time_hours(mut self, hours: i64) -> Self {
        self.lead_time_hours = hours;
        self
    }

    /// Today's date in the context timezone.
    pub fn today(&self) -> NaiveDate {
        self.now.with_timezone(&self.timezone).date_naive()
    }
}

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| SlotError::InvalidDate(s.to_string()))
}

/// Parse an RFC 3339 instant, or a naive `YYYY-MM-DDTHH:MM:SS` read as UTC.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|_| SlotError::InvalidTime(s.to_string()))
}
