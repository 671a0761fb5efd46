use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const METERS_PER_MILE: f64 = 1609.344;

/// Unit system distances are reported in.
#[derive(Debug, Deserialize, Serialize, JsonSchema, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Convert a distance in meters to kilometers or miles.
    pub fn distance_from_meters(self, meters: f64) -> f64 {
        match self {
            UnitSystem::Metric => meters / 1000.0,
            UnitSystem::Imperial => meters / METERS_PER_MILE,
        }
    }
}
