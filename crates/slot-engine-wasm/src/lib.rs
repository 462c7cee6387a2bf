//! WASM bindings for slot-engine.
//!
//! Exposes slot generation, horizon scanning, and weekday checks to the booking
//! page via `wasm-bindgen`. All complex types cross the boundary as JSON
//! strings in the backend's wire shapes, so the page can hand over API
//! responses untouched.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;
use slot_engine::busy::{BusyCalendar, BusyIntervals};
use slot_engine::context::{parse_date, parse_instant, parse_timezone};
use slot_engine::horizon;
use slot_engine::weekly::WeeklyAvailability;
use slot_engine::SlotContext;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HorizonDto {
    /// Every date the picker may offer, `YYYY-MM-DD`.
    candidate_dates: Vec<String>,
    /// Subset of `candidate_dates` with no free slot.
    fully_booked: Vec<String>,
    /// The selection after auto-advance, if any date is bookable.
    selected: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers: JSON and scalar parsing with JS-facing errors
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_availability(json: &str) -> Result<WeeklyAvailability, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid availability JSON: {}", e)))
}

fn parse_json_value(json: &str) -> Result<serde_json::Value, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid busy JSON: {}", e)))
}

fn context(now: Option<String>, timezone: &str, lead_time_hours: Option<i32>) -> Result<SlotContext, JsValue> {
    let tz: Tz = parse_timezone(timezone).map_err(js_err)?;
    let mut ctx = match now {
        Some(s) => SlotContext::at(parse_instant(&s).map_err(js_err)?, tz),
        None => SlotContext::system(tz),
    };
    if let Some(hours) = lead_time_hours {
        ctx = ctx.with_lead_time_hours(i64::from(hours));
    }
    Ok(ctx)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate candidate slots for one date.
///
/// - `availability_json` -- `[{dayOfWeek, timeSlots: [{start, end}]}]`
/// - `date` -- `YYYY-MM-DD`
/// - `duration` -- slot length in minutes
/// - `busy_json` -- the `/bookings/slots` response (`busyIntervals` or
///   `busySlots`), or a bare array. Pass `null` after a failed fetch: the
///   date is then treated as free and the backend re-checks on submit.
/// - `now` -- RFC 3339 instant; defaults to the current time
/// - `timezone` -- the viewer's IANA timezone
///
/// Returns a JSON array of `{start, end, busy}`.
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots(
    availability_json: &str,
    date: &str,
    duration: u32,
    busy_json: Option<String>,
    now: Option<String>,
    timezone: &str,
    lead_time_hours: Option<i32>,
) -> Result<String, JsValue> {
    let availability = parse_availability(availability_json)?;
    let date = parse_date(date).map_err(js_err)?;
    let busy = match busy_json {
        Some(json) => BusyIntervals::from_payload(&parse_json_value(&json)?),
        None => BusyIntervals::empty(),
    };
    let ctx = context(now, timezone, lead_time_hours)?;

    let slots = slot_engine::generate_slots(&availability, date, duration, &busy, &ctx);
    to_json(&slots)
}

/// Classify the picker's date range and reconcile the current selection.
///
/// `busy_calendar_json` is an object keyed by `YYYY-MM-DD`; dates missing from
/// it are scanned with no known conflicts. `selected` is the page's current
/// date, if any. `horizon_days` defaults to 62.
#[wasm_bindgen(js_name = "scanHorizon")]
#[allow(clippy::too_many_arguments)]
pub fn scan_horizon(
    availability_json: &str,
    duration: u32,
    busy_calendar_json: &str,
    selected: Option<String>,
    horizon_days: Option<u32>,
    now: Option<String>,
    timezone: &str,
    lead_time_hours: Option<i32>,
) -> Result<String, JsValue> {
    let availability = parse_availability(availability_json)?;
    let busy = BusyCalendar::from_payload(&parse_json_value(busy_calendar_json)?);
    let ctx = context(now, timezone, lead_time_hours)?;
    let selected: Option<NaiveDate> = selected
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(js_err)?;

    let dates = horizon::candidate_dates(
        &availability,
        ctx.today(),
        horizon_days.unwrap_or(slot_engine::config::DEFAULT_HORIZON_DAYS),
    );
    let fully_booked = horizon::scan_horizon(&availability, duration, &dates, &busy, &ctx);
    let selected = horizon::reconcile_selection(selected, &dates, &fully_booked);

    to_json(&HorizonDto {
        candidate_dates: dates.iter().map(|d| d.to_string()).collect(),
        fully_booked: fully_booked.iter().map(|d| d.to_string()).collect(),
        selected: selected.map(|d| d.to_string()),
    })
}

/// True if the schedule has an entry for the weekday of `date` (`YYYY-MM-DD`).
#[wasm_bindgen(js_name = "isAllowedWeekday")]
pub fn is_allowed_weekday(availability_json: &str, date: &str) -> Result<bool, JsValue> {
    let availability = parse_availability(availability_json)?;
    let date = parse_date(date).map_err(js_err)?;
    Ok(slot_engine::is_allowed_weekday(&availability, date))
}
