//! Sensor configuration and its validation rules.

use schemars::JsonSchema;
use serde::Deserialize;
use thiserror::Error;

use commute_ors::profile::{RoutePreference, TravelProfile};

use crate::location::{Coordinate, LocationSource, TrackedEntity};
use crate::travel_time::TravelQuery;
use crate::units::UnitSystem;

pub const DEFAULT_NAME: &str = "Openroute Service Travel Time";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("api_key is required, set it in the config or the environment")]
    MissingApiKey,

    #[error("{endpoint}: set either latitude/longitude or entity_id, not both")]
    LocationOverdetermined { endpoint: &'static str },

    #[error("{endpoint}: latitude and longitude must be given together")]
    IncompleteCoordinates { endpoint: &'static str },

    #[error("{endpoint}: latitude/longitude or entity_id is required")]
    LocationMissing { endpoint: &'static str },

    #[error("invalid latitude {0}, expected -90.0 to 90.0")]
    InvalidLatitude(f64),

    #[error("invalid longitude {0}, expected -180.0 to 180.0")]
    InvalidLongitude(f64),

    #[error("entity {entity_id} is not trackable, expected one of device_tracker, sensor, zone or person")]
    UntrackableEntity { entity_id: String },
}

/// One endpoint of the travel query. Exactly one of the coordinate pair
/// or `entity_id` must be set; `validate` enforces the exclusivity.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub entity_id: Option<String>,
}

impl LocationConfig {
    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            entity_id: None,
        }
    }

    pub fn entity(entity_id: impl Into<String>) -> Self {
        Self {
            latitude: None,
            longitude: None,
            entity_id: Some(entity_id.into()),
        }
    }
}

/// Travel-time sensor configuration, as read from the config file.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SensorConfig {
    /// OpenRouteService API key; may also come from the environment
    pub api_key: Option<String>,

    /// Sensor display name
    pub name: Option<String>,

    pub origin: LocationConfig,
    pub destination: LocationConfig,

    /// Travel profile, defaults to "driving-car"
    pub mode: Option<TravelProfile>,

    /// Route optimization preference, defaults to "fastest"
    pub route_mode: Option<RoutePreference>,

    /// Overrides the host unit system
    pub unit_system: Option<UnitSystem>,
}

/// A validated configuration, ready to build a sensor from.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub api_key: String,
    pub name: String,
    pub origin: LocationSource,
    pub destination: LocationSource,
    pub query: TravelQuery,
}

impl SensorConfig {
    /// Apply defaults and check the rules the host schema would enforce.
    pub fn validate(self, host_units: UnitSystem) -> Result<ValidatedConfig, ConfigError> {
        let api_key = self
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let origin = location_source("origin", &self.origin)?;
        let destination = location_source("destination", &self.destination)?;

        Ok(ValidatedConfig {
            api_key,
            name: self.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            origin,
            destination,
            query: TravelQuery {
                mode: self.mode.unwrap_or(TravelProfile::Car),
                route_mode: self.route_mode.unwrap_or(RoutePreference::Fastest),
                units: self.unit_system.unwrap_or(host_units),
            },
        })
    }
}

fn location_source(
    endpoint: &'static str,
    config: &LocationConfig,
) -> Result<LocationSource, ConfigError> {
    match (config.latitude, config.longitude, &config.entity_id) {
        (Some(_), _, Some(_)) | (_, Some(_), Some(_)) => {
            Err(ConfigError::LocationOverdetermined { endpoint })
        }
        (Some(lat), Some(lon), None) => {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(ConfigError::InvalidLatitude(lat));
            }
            if !(-180.0..=180.0).contains(&lon) {
                return Err(ConfigError::InvalidLongitude(lon));
            }
            Ok(LocationSource::Static(Coordinate { lat, lon }))
        }
        (Some(_), None, None) | (None, Some(_), None) => {
            Err(ConfigError::IncompleteCoordinates { endpoint })
        }
        (None, None, Some(entity_id)) => TrackedEntity::from_entity_id(entity_id)
            .map(LocationSource::Tracked)
            .ok_or_else(|| ConfigError::UntrackableEntity {
                entity_id: entity_id.clone(),
            }),
        (None, None, None) => Err(ConfigError::LocationMissing { endpoint }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::TrackerKind;

    fn minimal_config() -> SensorConfig {
        SensorConfig {
            api_key: Some("secret".to_string()),
            name: None,
            origin: LocationConfig::coordinates(50.8798, 4.7005),
            destination: LocationConfig::coordinates(50.8467, 4.3499),
            mode: None,
            route_mode: None,
            unit_system: None,
        }
    }

    #[test]
    fn test_validate_applies_defaults() {
        let validated = minimal_config().validate(UnitSystem::Metric).unwrap();

        assert_eq!(validated.name, DEFAULT_NAME);
        assert_eq!(validated.query.mode, TravelProfile::Car);
        assert_eq!(validated.query.route_mode, RoutePreference::Fastest);
        assert_eq!(validated.query.units, UnitSystem::Metric);
        assert_eq!(
            validated.origin,
            LocationSource::Static(Coordinate { lat: 50.8798, lon: 4.7005 })
        );
    }

    #[test]
    fn test_validate_keeps_explicit_values() {
        let config: SensorConfig = serde_json::from_str(
            r#"{
                "api_key": "secret",
                "name": "Commute to work",
                "origin": { "entity_id": "device_tracker.phone" },
                "destination": { "latitude": 50.8467, "longitude": 4.3499 },
                "mode": "cycling-regular",
                "route_mode": "shortest",
                "unit_system": "imperial"
            }"#,
        )
        .unwrap();

        let validated = config.validate(UnitSystem::Metric).unwrap();

        assert_eq!(validated.name, "Commute to work");
        assert_eq!(validated.query.mode, TravelProfile::Bicycle);
        assert_eq!(validated.query.route_mode, RoutePreference::Shortest);
        assert_eq!(validated.query.units, UnitSystem::Imperial);

        match validated.origin {
            LocationSource::Tracked(entity) => {
                assert_eq!(entity.kind, TrackerKind::DeviceTracker);
                assert_eq!(entity.entity_id, "device_tracker.phone");
            }
            other => panic!("expected a tracked origin, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_requires_api_key() {
        let mut config = minimal_config();
        config.api_key = None;
        assert_eq!(
            config.validate(UnitSystem::Metric).unwrap_err(),
            ConfigError::MissingApiKey
        );

        let mut config = minimal_config();
        config.api_key = Some(String::new());
        assert_eq!(
            config.validate(UnitSystem::Metric).unwrap_err(),
            ConfigError::MissingApiKey
        );
    }

    #[test]
    fn test_validate_rejects_both_location_kinds() {
        let mut config = minimal_config();
        config.origin.entity_id = Some("device_tracker.phone".to_string());

        assert_eq!(
            config.validate(UnitSystem::Metric).unwrap_err(),
            ConfigError::LocationOverdetermined { endpoint: "origin" }
        );
    }

    #[test]
    fn test_validate_rejects_empty_location() {
        let mut config = minimal_config();
        config.destination = LocationConfig::default();

        assert_eq!(
            config.validate(UnitSystem::Metric).unwrap_err(),
            ConfigError::LocationMissing { endpoint: "destination" }
        );
    }

    #[test]
    fn test_validate_rejects_half_a_coordinate() {
        let mut config = minimal_config();
        config.origin.longitude = None;

        assert_eq!(
            config.validate(UnitSystem::Metric).unwrap_err(),
            ConfigError::IncompleteCoordinates { endpoint: "origin" }
        );
    }

    #[test]
    fn test_validate_rejects_out_of_range_coordinates() {
        let mut config = minimal_config();
        config.origin.latitude = Some(90.5);
        assert_eq!(
            config.validate(UnitSystem::Metric).unwrap_err(),
            ConfigError::InvalidLatitude(90.5)
        );

        let mut config = minimal_config();
        config.destination.longitude = Some(-181.0);
        assert_eq!(
            config.validate(UnitSystem::Metric).unwrap_err(),
            ConfigError::InvalidLongitude(-181.0)
        );
    }

    #[test]
    fn test_validate_rejects_untrackable_domain() {
        let mut config = minimal_config();
        config.origin = LocationConfig::entity("light.kitchen");

        assert_eq!(
            config.validate(UnitSystem::Metric).unwrap_err(),
            ConfigError::UntrackableEntity {
                entity_id: "light.kitchen".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<SensorConfig>(
            r#"{
                "api_key": "secret",
                "origin": { "latitude": 50.0, "longitude": 4.0 },
                "destination": { "latitude": 51.0, "longitude": 5.0 },
                "scan_interval": 300
            }"#,
        );

        assert!(parsed.is_err());
    }
}
