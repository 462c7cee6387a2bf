//! Booking submission pre-check.
//!
//! Runs on the client right before the checkout request is sent. It catches
//! incomplete forms and stale slot selections early; the backend still checks
//! the slot against live reservations and is the authority on conflicts.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::BookingError;
use crate::slots::CandidateSlot;

/// The checkout payload posted to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub service_id: String,
    pub therapist_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub duration: u32,
    /// Start of the chosen slot, `"HH:MM"`.
    pub time_slot: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl BookingRequest {
    /// Check required fields, email shape, and that `time_slot` names a free
    /// slot in `slots` (the list generated for `date` and `duration`).
    ///
    /// A field counts as missing only when it is empty; whitespace is left to
    /// the backend. When several slots share a start, the first one decides.
    pub fn validate(&self, slots: &[CandidateSlot]) -> Result<(), BookingError> {
        let required = [
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
            ("phone", self.phone.as_str()),
            ("email", self.email.as_str()),
            ("address", self.address.as_str()),
            ("date", self.date.as_str()),
            ("timeSlot", self.time_slot.as_str()),
            ("therapistId", self.therapist_id.as_str()),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(BookingError::MissingField(*name));
        }
        if self.duration == 0 {
            return Err(BookingError::MissingField("duration"));
        }

        if !is_plausible_email(&self.email) {
            return Err(BookingError::InvalidEmail(self.email.clone()));
        }

        match slots.iter().find(|s| s.start == self.time_slot) {
            Some(slot) if !slot.busy => Ok(()),
            _ => Err(BookingError::SlotUnavailable(self.time_slot.clone())),
        }
    }
}

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));

/// `local@domain.tld` with no whitespace anywhere. Deliberately loose.
pub fn is_plausible_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
