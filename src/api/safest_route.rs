use serde::Deserialize;

use super::RouteSource;
use crate::constants::SAFEST_ROUTE_PATH;
use crate::error::EndpointError;
use crate::models::{Coordinate, RankedResult, RouteCandidate};

#[derive(Debug, Deserialize)]
struct SafestRoutePayload {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    ranked_routes: Option<Vec<RankedRoute>>,
}

#[derive(Debug, Deserialize)]
struct RankedRoute {
    score: f64,
    distance: f64,
    #[serde(default)]
    time: Option<f64>,
    // Entries without geometry are still ranked, just with nothing to draw
    #[serde(default)]
    route: RouteGeometry,
}

#[derive(Debug, Default, Deserialize)]
struct RouteGeometry {
    #[serde(default)]
    points: LineString,
}

/// GeoJSON line string; positions are `[lon, lat]` with an optional elevation
#[derive(Debug, Default, Deserialize)]
struct LineString {
    #[serde(default)]
    coordinates: Vec<Vec<f64>>,
}

impl RankedRoute {
    fn into_candidate(self, rank: usize) -> Result<RouteCandidate, EndpointError> {
        let invalid = |what: &str| EndpointError::Decode(format!("route #{rank}: {what}"));

        if !self.score.is_finite() {
            return Err(invalid("score is not a number"));
        }
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(invalid("distance must be a non-negative number"));
        }
        let time = self.time.unwrap_or(0.0);
        if !time.is_finite() || time < 0.0 {
            return Err(invalid("time must be a non-negative number"));
        }

        // Stored as [lon, lat]; everything downstream consumes (lat, lon)
        let polyline = self
            .route
            .points
            .coordinates
            .iter()
            .map(|position| match position.as_slice() {
                [lon, lat, ..] => Coordinate::from_lon_lat(*lon, *lat)
                    .map_err(|e| invalid(&e.to_string())),
                _ => Err(invalid("position needs a longitude and a latitude")),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RouteCandidate::new(polyline, self.distance, time, self.score))
    }
}

/// Turn an HTTP status and body into ranked routes or a typed error
///
/// # Errors
///
/// - `EndpointError::Transport` for any non-2xx status
/// - `EndpointError::Application` when the payload carries an `error` field
/// - `EndpointError::Decode` when the payload is not a ranked route list
pub fn interpret_response(status: u16, body: &str) -> Result<RankedResult, EndpointError> {
    if !(200..300).contains(&status) {
        return Err(EndpointError::Transport { status });
    }

    let payload: SafestRoutePayload =
        serde_json::from_str(body).map_err(|e| EndpointError::Decode(e.to_string()))?;

    if let Some(message) = payload.error {
        return Err(EndpointError::Application(message));
    }

    let routes = payload
        .ranked_routes
        .ok_or_else(|| EndpointError::Decode("missing ranked_routes".to_string()))?;

    routes
        .into_iter()
        .enumerate()
        .map(|(i, route)| route.into_candidate(i + 1))
        .collect::<Result<Vec<_>, _>>()
        .map(RankedResult::new)
}

/// HTTP client for the backend's `/safest-route` endpoint
#[derive(Debug, Clone)]
pub struct SafestRouteClient {
    base_url: String,
    http: reqwest::Client,
}

impl SafestRouteClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Full request URL for a start/end pair
    #[must_use]
    pub fn request_url(&self, start: Coordinate, end: Coordinate) -> String {
        format!(
            "{}{SAFEST_ROUTE_PATH}?start_lat={}&start_lon={}&end_lat={}&end_lon={}",
            self.base_url,
            start.lat(),
            start.lon(),
            end.lat(),
            end.lon()
        )
    }
}

impl RouteSource for SafestRouteClient {
    async fn fetch_safest_routes(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<RankedResult, EndpointError> {
        let url = self.request_url(start, end);
        crate::log!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| EndpointError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| EndpointError::Request(e.to_string()))?;

        interpret_response(status, &body)
    }
}
