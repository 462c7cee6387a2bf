//! Resolving a local wall-clock time to an absolute instant across DST
//! transitions.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolve a local datetime in `tz` to UTC.
///
/// - Unambiguous times map directly.
/// - Times repeated by a fall-back transition resolve to the earlier instant.
/// - Times skipped by a spring-forward gap shift forward by the gap, so 02:30
///   on a day that jumps 02:00 -> 03:00 resolves to 03:30.
pub fn resolve_local(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            // Gaps are at most a few hours; the pre-gap offset applied to the
            // skipped wall time lands after the transition.
            let before = tz
                .from_local_datetime(&(local - Duration::hours(3)))
                .earliest()?;
            let offset_secs = before.offset().fix().local_minus_utc();
            let shifted = local - Duration::seconds(i64::from(offset_secs));
            Some(DateTime::from_naive_utc_and_offset(shifted, Utc))
        }
    }
}
