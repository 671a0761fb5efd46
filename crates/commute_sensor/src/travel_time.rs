use thiserror::Error;
use tracing::debug;

use commute_ors::client::{OrsError, RouteApi};
use commute_ors::profile::{RoutePreference, TravelProfile};
use commute_ors::types::Step;

use crate::location::{Coordinate, CoordinateParseError};
use crate::units::UnitSystem;

/// Step name ORS uses for unnamed ways.
const NO_NAME: &str = "-";

#[derive(Debug, Error)]
pub enum TravelTimeError {
    #[error(transparent)]
    Location(#[from] CoordinateParseError),

    #[error(transparent)]
    Api(#[from] OrsError),

    #[error("directions response contained no route")]
    NoRoute,

    #[error("route contained no segments")]
    NoSegments,

    #[error("no reverse geocoding result for {0}")]
    NoGeocodeResult(String),
}

/// Query settings shared by every refresh of one sensor.
#[derive(Debug, Clone, Copy)]
pub struct TravelQuery {
    pub mode: TravelProfile,
    pub route_mode: RoutePreference,
    pub units: UnitSystem,
}

/// The product of one successful fetch, replaced wholesale per cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelSnapshot {
    pub attribution: String,

    /// Travel time in seconds
    pub duration_secs: f64,

    /// Distance in the configured unit, kilometers or miles
    pub distance: f64,

    /// "; "-joined road names along the route
    pub route: String,

    pub origin_name: String,
    pub destination_name: String,
}

/// Fetches travel data between two resolved locations and keeps the last
/// successful snapshot.
pub struct TravelTimeData<A> {
    api: A,
    query: TravelQuery,
    origin: Option<String>,
    destination: Option<String>,
    snapshot: Option<TravelSnapshot>,
}

impl<A: RouteApi> TravelTimeData<A> {
    pub fn new(query: TravelQuery, api: A) -> Self {
        Self {
            api,
            query,
            origin: None,
            destination: None,
            snapshot: None,
        }
    }

    pub fn query(&self) -> &TravelQuery {
        &self.query
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    pub fn snapshot(&self) -> Option<&TravelSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn set_origin(&mut self, location: String) {
        self.origin = Some(location);
    }

    pub fn set_destination(&mut self, location: String) {
        self.destination = Some(location);
    }

    /// Fetch the latest travel data. A no-op until both endpoints are
    /// set; on failure the previous snapshot stays in place.
    pub async fn update(&mut self) -> Result<(), TravelTimeError> {
        let (Some(origin), Some(destination)) = (&self.origin, &self.destination) else {
            return Ok(());
        };

        let origin_coord: Coordinate = origin.parse()?;
        let destination_coord: Coordinate = destination.parse()?;

        debug!(
            "Requesting route for origin: {}, destination: {}, mode: {}, route_mode: {}",
            origin, destination, self.query.mode, self.query.route_mode
        );

        // The directions API expects the destination first.
        let coordinates = [destination_coord.into(), origin_coord.into()];
        let directions = self
            .api
            .directions(&coordinates, self.query.mode, self.query.route_mode)
            .await?;

        let route = directions.routes.first().ok_or(TravelTimeError::NoRoute)?;
        let steps = route
            .segments
            .first()
            .map(|segment| segment.steps.as_slice())
            .ok_or(TravelTimeError::NoSegments)?;

        let destination_name = self.place_label(destination_coord).await?;
        let origin_name = self.place_label(origin_coord).await?;

        self.snapshot = Some(TravelSnapshot {
            attribution: directions.metadata.attribution.clone(),
            duration_secs: route.summary.duration,
            distance: self.query.units.distance_from_meters(route.summary.distance),
            route: route_from_steps(steps),
            origin_name,
            destination_name,
        });

        Ok(())
    }

    async fn place_label(&self, point: Coordinate) -> Result<String, TravelTimeError> {
        debug!("Requesting reverse geocode for: {}", point);

        let response = self.api.reverse_geocode(point.into()).await?;
        let feature = response
            .features
            .into_iter()
            .next()
            .ok_or_else(|| TravelTimeError::NoGeocodeResult(point.to_string()))?;

        Ok(feature.properties.label)
    }
}

/// Extract a route description from the maneuver steps. A step repeating
/// the road name of the step right before it is collapsed; unnamed ways
/// ("-") are dropped. A name recurring after an unnamed stretch is a new
/// road and stays.
fn route_from_steps(steps: &[Step]) -> String {
    let mut road_names: Vec<&str> = Vec::new();
    let mut previous: Option<&str> = None;

    for step in steps {
        let road_name = step.name.as_str();
        if previous != Some(road_name) && road_name != NO_NAME {
            road_names.push(road_name);
        }
        previous = Some(road_name);
    }

    road_names.join("; ")
}
