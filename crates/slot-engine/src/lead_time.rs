//! Minimum advance notice before a slot may be booked.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::clock::parse_clock;
use crate::dst::resolve_local;

/// True iff the slot starting at `slot_start` on `date` (local to `tz`) begins
/// at or after `now + n_hours`.
///
/// A slot exactly `n_hours` ahead is allowed; one minute earlier is not. A
/// malformed `slot_start` is never far enough ahead, and neither is any slot
/// when `now + n_hours` falls outside the representable range.
pub fn is_slot_at_least_n_hours_ahead(
    slot_start: &str,
    n_hours: i64,
    date: NaiveDate,
    tz: &Tz,
    now: DateTime<Utc>,
) -> bool {
    let Some(earliest) = Duration::try_hours(n_hours).and_then(|lead| now.checked_add_signed(lead)) else {
        return false;
    };
    slot_instant(slot_start, date, tz).is_some_and(|start| start >= earliest)
}

/// The absolute instant of a local clock time on `date`.
pub fn slot_instant(slot_start: &str, date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    let time = parse_clock(slot_start)?;
    resolve_local(tz, date.and_time(time))
}
