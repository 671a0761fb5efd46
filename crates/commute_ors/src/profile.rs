use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Routing profile, https://openrouteservice.org/dev/#/api-docs/v2/directions
#[derive(Debug, Deserialize, Serialize, JsonSchema, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TravelProfile {
    #[serde(rename = "driving-car")]
    Car,

    #[serde(rename = "cycling-regular")]
    Bicycle,

    #[serde(rename = "foot-walking")]
    Pedestrian,
}

impl Display for TravelProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TravelProfile::Car => "driving-car",
                TravelProfile::Bicycle => "cycling-regular",
                TravelProfile::Pedestrian => "foot-walking",
            }
        )
    }
}

/// Which metric the route is optimized for.
#[derive(Debug, Deserialize, Serialize, JsonSchema, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RoutePreference {
    Fastest,
    Shortest,
}

impl Display for RoutePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RoutePreference::Fastest => "fastest",
                RoutePreference::Shortest => "shortest",
            }
        )
    }
}
