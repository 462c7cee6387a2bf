//! Clock-time arithmetic on 24h `"HH:MM"` strings.
//!
//! Times are minute offsets from midnight, parsed and formatted through
//! [`NaiveTime`]. Anything `"%H:%M"` does not accept yields `None`. Every
//! comparison a caller makes against `None` is treated as false, so a malformed
//! interval simply contributes no slots.

use chrono::{Duration, NaiveTime, Timelike};

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

const CLOCK_FORMAT: &str = "%H:%M";

/// Parse `"HH:MM"` into a wall-clock time.
pub fn parse_clock(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time.trim(), CLOCK_FORMAT).ok()
}

/// Parse `"HH:MM"` into minutes from midnight (`h * 60 + m`).
///
/// Returns `None` for malformed input (missing colon, non-digits, hours above
/// 23, minutes above 59, trailing seconds).
pub fn time_to_minutes(time: &str) -> Option<u32> {
    parse_clock(time).map(|t| t.hour() * 60 + t.minute())
}

/// Format a minute-of-day as `"HH:MM"`.
///
/// Values outside a single day wrap around midnight; the day component is
/// discarded.
pub fn format_minutes(minutes: i64) -> String {
    let wrapped = minutes.rem_euclid(MINUTES_PER_DAY);
    let (time, _) = NaiveTime::MIN.overflowing_add_signed(Duration::minutes(wrapped));
    time.format(CLOCK_FORMAT).to_string()
}

/// Add `delta` minutes to a clock time.
///
/// A result past 23:59 rolls over to the next day's clock value, so
/// `add_minutes("23:50", 30)` is `"00:20"`. Cross-midnight slots are not
/// supported by the generator for exactly this reason.
pub fn add_minutes(time: &str, delta: i64) -> Option<String> {
    let start = parse_clock(time)?;
    let (end, _) = start.overflowing_add_signed(Duration::try_minutes(delta)?);
    Some(end.format(CLOCK_FORMAT).to_string())
}

/// Closed-open interval intersection: `[s1, e1)` and `[s2, e2)` overlap iff
/// neither ends at or before the other's start.
///
/// Adjacent intervals (`e1 == s2`) do not overlap.
pub fn intervals_overlap(s1: i64, e1: i64, s2: i64, e2: i64) -> bool {
    !(e1 <= s2 || s1 >= e2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_digit_hours() {
        assert_eq!(time_to_minutes("9:05"), Some(545));
    }

    #[test]
    fn rejects_seconds_suffix() {
        assert_eq!(time_to_minutes("09:00:00"), None);
    }

    #[test]
    fn negative_delta_wraps_backwards() {
        assert_eq!(add_minutes("00:10", -20).as_deref(), Some("23:50"));
    }
}
