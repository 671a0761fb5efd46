use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::profile::{RoutePreference, TravelProfile};
use crate::types::{DirectionsResponse, GeocodeResponse};

/// Coordinate pair in ORS wire order, [lon, lat].
pub type OrsPoint = [f64; 2];

#[derive(Debug, Error)]
pub enum OrsError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Error body ORS attaches to non-success statuses.
#[derive(Deserialize)]
struct ErrorPayload {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    code: u32,
    message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectionsRequestBody {
    /// Waypoints in visit order, [lon, lat] each
    pub coordinates: Vec<OrsPoint>,

    /// Route optimization preference, "fastest" or "shortest"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference: Option<RoutePreference>,
}

pub struct OrsClientParams {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

pub const ORS_API_BASE_URL: &str = "https://api.openrouteservice.org";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

impl OrsClientParams {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: ORS_API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// The slice of the ORS API the travel-time sensor needs. Implemented by
/// [`OrsClient`]; sensors stay generic over it so tests can substitute a
/// canned client.
pub trait RouteApi {
    /// Fetch directions through `coordinates` in visit order.
    fn directions(
        &self,
        coordinates: &[geo_types::Point],
        profile: TravelProfile,
        preference: RoutePreference,
    ) -> impl Future<Output = Result<DirectionsResponse, OrsError>> + Send;

    /// Look up the place label nearest to `point`.
    fn reverse_geocode(
        &self,
        point: geo_types::Point,
    ) -> impl Future<Output = Result<GeocodeResponse, OrsError>> + Send;
}

impl<A: RouteApi + Sync> RouteApi for &A {
    fn directions(
        &self,
        coordinates: &[geo_types::Point],
        profile: TravelProfile,
        preference: RoutePreference,
    ) -> impl Future<Output = Result<DirectionsResponse, OrsError>> + Send {
        (**self).directions(coordinates, profile, preference)
    }

    fn reverse_geocode(
        &self,
        point: geo_types::Point,
    ) -> impl Future<Output = Result<GeocodeResponse, OrsError>> + Send {
        (**self).reverse_geocode(point)
    }
}

pub struct OrsClient {
    params: OrsClientParams,
    client: reqwest::Client,
}

impl OrsClient {
    pub fn new(params: OrsClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    async fn handle_response<T>(&self, response: reqwest::Response) -> Result<T, OrsError>
    where
        T: serde::de::DeserializeOwned,
    {
        if response.status().is_success() {
            let parsed: T = response.json().await?;
            Ok(parsed)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorPayload>(&body) {
                Ok(payload) => format!("{} (code {})", payload.error.message, payload.error.code),
                Err(_) => body,
            };
            Err(OrsError::Api { status, message })
        }
    }
}

impl RouteApi for OrsClient {
    async fn directions(
        &self,
        coordinates: &[geo_types::Point],
        profile: TravelProfile,
        preference: RoutePreference,
    ) -> Result<DirectionsResponse, OrsError> {
        let ors_points: Vec<OrsPoint> = coordinates.iter().map(|p| [p.x(), p.y()]).collect();

        let body = DirectionsRequestBody {
            coordinates: ors_points,
            preference: Some(preference),
        };

        let url = format!("{}/v2/directions/{}", self.params.base_url, profile);

        debug!(
            "OrsApi: Requesting {} directions through {} points",
            profile,
            coordinates.len()
        );

        let response = self
            .client
            .post(url)
            .timeout(self.params.timeout)
            .header("Authorization", &self.params.api_key)
            .json(&body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn reverse_geocode(&self, point: geo_types::Point) -> Result<GeocodeResponse, OrsError> {
        let url = format!("{}/geocode/reverse", self.params.base_url);

        debug!("OrsApi: Reverse geocoding {},{}", point.y(), point.x());

        let response = self
            .client
            .get(url)
            .timeout(self.params.timeout)
            .query(&[("api_key", self.params.api_key.as_str())])
            .query(&[("point.lon", point.x()), ("point.lat", point.y())])
            .send()
            .await?;

        self.handle_response(response).await
    }
}
