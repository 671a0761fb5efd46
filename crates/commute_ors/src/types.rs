use serde::Deserialize;

/// Directions response, trimmed to the fields the sensor reads.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    pub routes: Vec<Route>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    /// Data attribution line, e.g. "openrouteservice.org | OpenStreetMap contributors"
    pub attribution: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    pub summary: RouteSummary,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RouteSummary {
    /// Distance in meters
    pub distance: f64,

    /// Travel time in seconds
    pub duration: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Segment {
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    /// Road name of the maneuver, "-" for unnamed ways
    pub name: String,
}

/// Reverse geocoding response, a GeoJSON feature collection.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureProperties {
    /// Human readable place label, e.g. "Grote Markt 9, Leuven, Belgium"
    pub label: String,
}
