use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, warn};

use crate::entity::StateStore;

/// A latitude/longitude pair. `Display` and `FromStr` use the `"lat,lon"`
/// string form locations resolve to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

impl From<Coordinate> for geo_types::Point {
    fn from(coordinate: Coordinate) -> Self {
        geo_types::Point::new(coordinate.lon, coordinate.lat)
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid \"latitude,longitude\" pair: {input}")]
pub struct CoordinateParseError {
    pub input: String,
}

impl FromStr for Coordinate {
    type Err = CoordinateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = || CoordinateParseError {
            input: s.to_string(),
        };

        let (lat, lon) = s.split_once(',').ok_or_else(parse_error)?;
        let lat: f64 = lat.trim().parse().map_err(|_| parse_error())?;
        let lon: f64 = lon.trim().parse().map_err(|_| parse_error())?;

        Ok(Coordinate { lat, lon })
    }
}

/// Entity domains that can act as a location source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerKind {
    DeviceTracker,
    Sensor,
    Zone,
    Person,
}

impl TrackerKind {
    pub fn from_domain(domain: &str) -> Option<Self> {
        match domain {
            "device_tracker" => Some(TrackerKind::DeviceTracker),
            "sensor" => Some(TrackerKind::Sensor),
            "zone" => Some(TrackerKind::Zone),
            "person" => Some(TrackerKind::Person),
            _ => None,
        }
    }
}

/// A location source backed by a host entity, re-resolved every refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedEntity {
    pub kind: TrackerKind,
    pub entity_id: String,
}

impl TrackedEntity {
    /// Classify an entity id by its domain prefix. `None` when the domain
    /// is not trackable.
    pub fn from_entity_id(entity_id: &str) -> Option<Self> {
        let (domain, _) = entity_id.split_once('.')?;
        let kind = TrackerKind::from_domain(domain)?;

        Some(Self {
            kind,
            entity_id: entity_id.to_string(),
        })
    }

    /// Resolve the entity to a `"lat,lon"` location string.
    ///
    /// Tries the entity's own coordinate attributes first, then the zone
    /// its state names. Sensors may carry the location directly as their
    /// state. A missing entity is logged and yields `None`.
    pub fn resolve<S: StateStore>(&self, store: &S) -> Option<String> {
        let Some(entity) = store.entity_state(&self.entity_id) else {
            warn!("Unable to find entity {}", self.entity_id);
            return None;
        };

        if let Some(position) = entity.position() {
            return Some(position.to_string());
        }

        let zone_id = format!("zone.{}", entity.state);
        if let Some(position) = store.entity_state(&zone_id).and_then(|zone| zone.position()) {
            debug!("{} is in {}, resolved to the zone location", self.entity_id, zone_id);
            return Some(position.to_string());
        }

        match self.kind {
            TrackerKind::Sensor => Some(entity.state),
            TrackerKind::DeviceTracker | TrackerKind::Zone | TrackerKind::Person => None,
        }
    }
}

/// Where one endpoint of the travel query comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationSource {
    /// Fixed coordinates, formatted once at setup.
    Static(Coordinate),
    /// Entity state, re-resolved on every refresh.
    Tracked(TrackedEntity),
}
