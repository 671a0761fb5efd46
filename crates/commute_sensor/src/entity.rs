use std::collections::HashMap;

use serde::Deserialize;

use crate::location::Coordinate;

/// Attributes of a host entity, trimmed to the location fields the
/// resolver reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityAttributes {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Snapshot of a host entity: its state string plus attributes.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityState {
    pub state: String,

    #[serde(default)]
    pub attributes: EntityAttributes,
}

impl EntityState {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            attributes: EntityAttributes::default(),
        }
    }

    pub fn with_position(state: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            state: state.into(),
            attributes: EntityAttributes {
                latitude: Some(lat),
                longitude: Some(lon),
            },
        }
    }

    /// Position from the latitude/longitude attributes, when both are set.
    pub fn position(&self) -> Option<Coordinate> {
        match (self.attributes.latitude, self.attributes.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinate { lat, lon }),
            _ => None,
        }
    }
}

/// Read access to the host's entity states.
pub trait StateStore {
    fn entity_state(&self, entity_id: &str) -> Option<EntityState>;
}

/// In-memory [`StateStore`], for the CLI runner and tests.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    states: HashMap<String, EntityState>,
}

impl MemoryStateStore {
    pub fn new(states: HashMap<String, EntityState>) -> Self {
        Self { states }
    }

    pub fn insert(&mut self, entity_id: impl Into<String>, state: EntityState) {
        self.states.insert(entity_id.into(), state);
    }
}

impl StateStore for MemoryStateStore {
    fn entity_state(&self, entity_id: &str) -> Option<EntityState> {
        self.states.get(entity_id).cloned()
    }
}
