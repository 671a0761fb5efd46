use std::sync::Mutex;

use serde_json::json;

use commute_ors::client::{OrsError, RouteApi};
use commute_ors::profile::{RoutePreference, TravelProfile};
use commute_ors::types::{DirectionsResponse, GeocodeResponse};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FakeCall {
    Directions {
        coordinates: Vec<[f64; 2]>,
        profile: TravelProfile,
        preference: RoutePreference,
    },
    ReverseGeocode {
        point: [f64; 2],
    },
}

#[derive(Default)]
struct FakeBehavior {
    fail_directions: bool,
    fail_geocode: bool,
    empty_routes: bool,
    empty_geocode: bool,
}

/// Canned [`RouteApi`] that records its calls. Geocode labels are derived
/// from the queried point so tests can tell the endpoints apart.
pub(crate) struct FakeRouteApi {
    directions: DirectionsResponse,
    behavior: Mutex<FakeBehavior>,
    calls: Mutex<Vec<FakeCall>>,
}

impl FakeRouteApi {
    pub fn new(directions: DirectionsResponse) -> Self {
        Self {
            directions,
            behavior: Mutex::new(FakeBehavior::default()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_directions(&self) {
        self.behavior.lock().unwrap().fail_directions = true;
    }

    pub fn fail_geocode(&self) {
        self.behavior.lock().unwrap().fail_geocode = true;
    }

    pub fn empty_routes(&self) {
        self.behavior.lock().unwrap().empty_routes = true;
    }

    pub fn empty_geocode(&self) {
        self.behavior.lock().unwrap().empty_geocode = true;
    }
}

pub(crate) fn directions_response(
    duration: f64,
    distance: f64,
    step_names: &[&str],
) -> DirectionsResponse {
    let steps: Vec<_> = step_names.iter().map(|name| json!({ "name": name })).collect();

    serde_json::from_value(json!({
        "routes": [{
            "summary": { "distance": distance, "duration": duration },
            "segments": [{ "steps": steps }],
        }],
        "metadata": { "attribution": "openrouteservice.org | OpenStreetMap contributors" },
    }))
    .unwrap()
}

pub(crate) fn label_for(point: [f64; 2]) -> String {
    format!("Place at {},{}", point[1], point[0])
}

fn api_error() -> OrsError {
    OrsError::Api {
        status: 502,
        message: "upstream unavailable".to_string(),
    }
}

impl RouteApi for FakeRouteApi {
    async fn directions(
        &self,
        coordinates: &[geo_types::Point],
        profile: TravelProfile,
        preference: RoutePreference,
    ) -> Result<DirectionsResponse, OrsError> {
        self.calls.lock().unwrap().push(FakeCall::Directions {
            coordinates: coordinates.iter().map(|p| [p.x(), p.y()]).collect(),
            profile,
            preference,
        });

        let behavior = self.behavior.lock().unwrap();
        if behavior.fail_directions {
            return Err(api_error());
        }

        let mut response = self.directions.clone();
        if behavior.empty_routes {
            response.routes.clear();
        }

        Ok(response)
    }

    async fn reverse_geocode(&self, point: geo_types::Point) -> Result<GeocodeResponse, OrsError> {
        let point = [point.x(), point.y()];
        self.calls
            .lock()
            .unwrap()
            .push(FakeCall::ReverseGeocode { point });

        let behavior = self.behavior.lock().unwrap();
        if behavior.fail_geocode {
            return Err(api_error());
        }

        let features = if behavior.empty_geocode {
            json!([])
        } else {
            json!([{ "properties": { "label": label_for(point) } }])
        };

        Ok(serde_json::from_value(json!({ "features": features })).unwrap())
    }
}
