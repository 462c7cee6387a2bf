//! Service definitions as served by the backend.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::weekly::WeeklyAvailability;

/// A bookable length and its price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceVariant {
    /// Slot length in minutes.
    pub duration: u32,
    pub price: f64,
}

/// The parts of a service document the booking flow reads. Other fields
/// (title, description, therapist profile) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDefinition {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub availability: WeeklyAvailability,
    #[serde(default)]
    pub variants: Vec<ServiceVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub therapist_id: Option<String>,
    /// Fixed service address; when set the client may not enter their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ServiceDefinition {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The variant preselected when the page opens: the first one listed.
    pub fn default_variant(&self) -> Option<&ServiceVariant> {
        self.variants.first()
    }

    pub fn variant_for_duration(&self, duration: u32) -> Option<&ServiceVariant> {
        self.variants.iter().find(|v| v.duration == duration)
    }

    pub fn price_for(&self, duration: u32) -> Option<f64> {
        self.variant_for_duration(duration).map(|v| v.price)
    }
}
