//! Valhalla HTTP adapter for turn-by-turn routes.

use tracing::debug;

use crate::error::RoutingError;
use crate::request::RouteRequest;
use crate::traits::RoutingService;
use crate::trip::{DirectionsRequest, ErrorResponse, Location, RouteResponse, Trip};

#[derive(Debug, Clone)]
pub struct ValhallaConfig {
    pub base_url: String,
    /// Costing model, e.g. "auto", "bicycle" or "pedestrian".
    pub costing: String,
    pub units: String,
    pub timeout_secs: u64,
}

impl Default for ValhallaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8002".to_string(),
            costing: "auto".to_string(),
            units: "kilometers".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValhallaClient {
    config: ValhallaConfig,
    client: reqwest::blocking::Client,
}

impl ValhallaClient {
    pub fn new(config: ValhallaConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ValhallaConfig {
        &self.config
    }

    /// Builds the request document for a two-stop route.
    pub fn directions_request(&self, request: &RouteRequest) -> DirectionsRequest {
        DirectionsRequest::new(
            vec![
                Location::stop(request.origin).with_heading(request.heading),
                Location::stop(request.destination),
            ],
            &self.config.costing,
            &self.config.units,
        )
    }
}

impl RoutingService for ValhallaClient {
    fn route(&self, request: &RouteRequest) -> Result<Trip, RoutingError> {
        let url = format!("{}/route", self.config.base_url.trim_end_matches('/'));
        debug!(%url, id = ?request.id, "requesting route");

        let response = self
            .client
            .post(url)
            .json(&self.directions_request(request))
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        parse_route_response(status, &body)
    }
}

/// Classifies a `/route` response.
///
/// An error payload wins over the status code so the service's own message
/// reaches the user; other non-success statuses are reported by code.
pub fn parse_route_response(status: u16, body: &str) -> Result<Trip, RoutingError> {
    if let Ok(error) = serde_json::from_str::<ErrorResponse>(body) {
        return Err(RoutingError::Service {
            message: error.error,
            code: error.error_code,
        });
    }
    if !(200..300).contains(&status) {
        return Err(RoutingError::Status(status));
    }

    let response: RouteResponse = serde_json::from_str(body)?;
    Ok(response.trip)
}
