use serde::Serialize;

use commute_ors::client::RouteApi;
use commute_ors::profile::{RoutePreference, TravelProfile};

use crate::entity::StateStore;
use crate::location::LocationSource;
use crate::travel_time::{TravelTimeData, TravelTimeError};
use crate::units::UnitSystem;

pub const UNIT_OF_MEASUREMENT: &str = "min";

const ICON_CAR: &str = "mdi:car";
const ICON_BICYCLE: &str = "mdi:bike";
const ICON_PEDESTRIAN: &str = "mdi:walk";

/// State attributes published next to the sensor state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorAttributes {
    pub attribution: String,

    /// Travel time in minutes
    pub duration: f64,

    /// Distance in the configured unit
    pub distance: f64,

    pub route: String,
    pub unit_system: UnitSystem,
    pub origin: String,
    pub destination: String,
    pub origin_name: String,
    pub destination_name: String,
    pub mode: TravelProfile,
    pub route_mode: RoutePreference,
}

/// A polled travel-time sensor entity.
pub struct TravelTimeSensor<A> {
    name: String,
    origin_source: LocationSource,
    destination_source: LocationSource,
    data: TravelTimeData<A>,
}

impl<A: RouteApi> TravelTimeSensor<A> {
    pub fn new(
        name: impl Into<String>,
        origin: LocationSource,
        destination: LocationSource,
        mut data: TravelTimeData<A>,
    ) -> Self {
        // Static locations never change, format them once.
        if let LocationSource::Static(coordinate) = &origin {
            data.set_origin(coordinate.to_string());
        }
        if let LocationSource::Static(coordinate) = &destination {
            data.set_destination(coordinate.to_string());
        }

        Self {
            name: name.into(),
            origin_source: origin,
            destination_source: destination,
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Travel time in whole minutes (ties round to even), `None` until
    /// the first successful fetch.
    pub fn state(&self) -> Option<String> {
        self.data.snapshot().map(|snapshot| {
            ((snapshot.duration_secs / 60.0).round_ties_even() as i64).to_string()
        })
    }

    pub fn unit_of_measurement(&self) -> &'static str {
        UNIT_OF_MEASUREMENT
    }

    /// Frontend icon for the configured travel profile.
    pub fn icon(&self) -> &'static str {
        match self.data.query().mode {
            TravelProfile::Car => ICON_CAR,
            TravelProfile::Bicycle => ICON_BICYCLE,
            TravelProfile::Pedestrian => ICON_PEDESTRIAN,
        }
    }

    /// `None` until a snapshot exists and both endpoints are resolved.
    pub fn attributes(&self) -> Option<SensorAttributes> {
        let snapshot = self.data.snapshot()?;
        let origin = self.data.origin()?;
        let destination = self.data.destination()?;
        let query = self.data.query();

        Some(SensorAttributes {
            attribution: snapshot.attribution.clone(),
            duration: snapshot.duration_secs / 60.0,
            distance: snapshot.distance,
            route: snapshot.route.clone(),
            unit_system: query.units,
            origin: origin.to_string(),
            destination: destination.to_string(),
            origin_name: snapshot.origin_name.clone(),
            destination_name: snapshot.destination_name.clone(),
            mode: query.mode,
            route_mode: query.route_mode,
        })
    }

    /// Re-resolve tracked endpoints against `store`, then fetch the
    /// latest travel data. A tracked endpoint that fails to resolve keeps
    /// its previous location.
    pub async fn refresh<S: StateStore>(&mut self, store: &S) -> Result<(), TravelTimeError> {
        if let LocationSource::Tracked(entity) = &self.origin_source {
            if let Some(location) = entity.resolve(store) {
                self.data.set_origin(location);
            }
        }

        if let LocationSource::Tracked(entity) = &self.destination_source {
            if let Some(location) = entity.resolve(store) {
                self.data.set_destination(location);
            }
        }

        self.data.update().await
    }
}
