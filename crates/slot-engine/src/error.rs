//! Error types for slot-engine operations.
//!
//! Slot computation itself never fails: bad schedule data degrades the result
//! set instead. These errors only arise at the parsing boundary, where callers
//! hand in dates, timezones, and raw JSON payloads.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a booking request is rejected before it is sent to the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Time slot {0} is busy or not offered on this date")]
    SlotUnavailable(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
