//! Engine configuration.
//!
//! The slot step (5 min) and the occupancy buffer (30 min) are fixed constants
//! in [`crate::slots`] and deliberately absent here.

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_LEAD_TIME_HOURS: i64 = 3;
pub const DEFAULT_HORIZON_DAYS: u32 = 62;
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 30;

/// Tunables for slot generation and date-picker scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Minimum notice before a slot's start.
    pub lead_time_hours: i64,
    /// How many days past today the horizon scanner classifies.
    pub horizon_days: u32,
    /// How far ahead the initial date selection searches for an open weekday.
    pub default_lookahead_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lead_time_hours: DEFAULT_LEAD_TIME_HOURS,
            horizon_days: DEFAULT_HORIZON_DAYS,
            default_lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
