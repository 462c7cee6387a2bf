//! # slot-engine
//!
//! Deterministic booking slot generation for a service marketplace.
//!
//! Given a service's weekly schedule, a requested duration, and the busy
//! intervals the backend reports for a date, the engine enumerates the
//! selectable appointment slots and flags the ones that collide with existing
//! reservations or start too soon. The same walk, repeated over a multi-week
//! window, tells a date picker which days are fully booked.
//!
//! The engine performs no I/O and reads no ambient state: the current instant,
//! the viewer's timezone, and the lead time all arrive in a [`SlotContext`].
//!
//! ## Modules
//!
//! - [`clock`] — `"HH:MM"` parsing, minute arithmetic, interval overlap
//! - [`weekly`] — Weekly schedule model and allowed weekdays
//! - [`busy`] — Busy-interval normalization (fail-open on fetch errors)
//! - [`slots`] — Candidate slot generation (5-minute step, 30-minute buffer)
//! - [`lead_time`] — Minimum advance notice before a slot
//! - [`horizon`] — Fully-booked date classification and selection advance
//! - [`selection`] — Initial date selection
//! - [`service`] — Service definition and duration/price variants
//! - [`booking`] — Submission pre-check
//! - [`context`] / [`config`] — Explicit inputs and tunables
//! - [`dst`] — Local time resolution across DST transitions
//! - [`error`] — Error types

pub mod booking;
pub mod busy;
pub mod clock;
pub mod config;
pub mod context;
pub mod dst;
pub mod error;
pub mod horizon;
pub mod lead_time;
pub mod selection;
pub mod service;
pub mod slots;
pub mod weekly;

pub use booking::BookingRequest;
pub use busy::{BusyCalendar, BusyInterval, BusyIntervals};
pub use clock::{add_minutes, intervals_overlap, time_to_minutes};
pub use config::EngineConfig;
pub use context::SlotContext;
pub use error::{BookingError, SlotError};
pub use horizon::{candidate_dates, reconcile_selection, scan_horizon};
pub use lead_time::is_slot_at_least_n_hours_ahead;
pub use service::{ServiceDefinition, ServiceVariant};
pub use slots::{generate_slots, CandidateSlot};
pub use weekly::{DayAvailability, TimeInterval, WeeklyAvailability};

/// True if the service has an entry for the weekday `date` falls on.
pub fn is_allowed_weekday(availability: &WeeklyAvailability, date: chrono::NaiveDate) -> bool {
    availability.is_allowed_weekday(date)
}
