// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google Directions client.
//!
//! Lookups never fail loudly: a non-OK status, a transport error or an
//! unexpected payload all come back as "no route".

use crate::models::directions::{LatLng, RouteSummary, TransitStep, TravelMode};
use serde::Deserialize;

/// Summary used when the API gives a route without one.
const DEFAULT_SUMMARY: &str = "Multiple Roads";

/// Google encodes overview polylines with 5 decimal digits.
const POLYLINE_PRECISION: u32 = 5;

/// Directions API client.
#[derive(Clone)]
pub struct DirectionsService {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl DirectionsService {
    pub fn new(http: reqwest::Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// Look up routes from `origin` to `destination`.
    ///
    /// Returns `None` when no route is available for any reason.
    pub async fn get_directions(
        &self,
        origin: LatLng,
        destination: LatLng,
        mode: TravelMode,
    ) -> Option<Vec<RouteSummary>> {
        tracing::debug!(?origin, ?destination, %mode, "Requesting directions");

        let result = match self.fetch(origin, destination, mode).await {
            Ok(response) => shape_routes(response),
            Err(e) => Err(e),
        };

        match result {
            Ok(routes) if !routes.is_empty() => Some(routes),
            Ok(_) => {
                tracing::debug!(%mode, "Directions API returned no routes");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, %mode, "Directions lookup failed");
                None
            }
        }
    }

    async fn fetch(
        &self,
        origin: LatLng,
        destination: LatLng,
        mode: TravelMode,
    ) -> Result<DirectionsApiResponse, DirectionsError> {
        let response = self
            .http
            .get(&self.url)
            .query(&[
                ("origin", format!("{},{}", origin[0], origin[1])),
                ("destination", format!("{},{}", destination[0], destination[1])),
                ("mode", mode.as_str().to_string()),
                ("departure_time", "now".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| DirectionsError::Http(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| DirectionsError::Payload(e.to_string()))
    }
}

/// Reshape a raw API reply (as JSON) into route summaries.
pub fn routes_from_value(value: serde_json::Value) -> Option<Vec<RouteSummary>> {
    let response: DirectionsApiResponse = serde_json::from_value(value).ok()?;
    shape_routes(response).ok().filter(|routes| !routes.is_empty())
}

fn shape_routes(response: DirectionsApiResponse) -> Result<Vec<RouteSummary>, DirectionsError> {
    if response.status != "OK" {
        return Err(DirectionsError::Status {
            status: response.status,
            message: response
                .error_message
                .unwrap_or_else(|| "No specific error message".to_string()),
        });
    }

    response.routes.into_iter().map(shape_route).collect()
}

fn shape_route(route: ApiRoute) -> Result<RouteSummary, DirectionsError> {
    let leg = route
        .legs
        .into_iter()
        .next()
        .ok_or_else(|| DirectionsError::Payload("route has no legs".to_string()))?;

    let line = polyline::decode_polyline(&route.overview_polyline.points, POLYLINE_PRECISION)
        .map_err(|e| DirectionsError::Polyline(e.to_string()))?;
    let points = line.0.iter().map(|c| [c.y, c.x]).collect();

    let transit_steps = leg
        .steps
        .into_iter()
        .filter_map(|step| step.transit_details)
        .map(|details| TransitStep {
            line: details.line.short_name,
            vehicle_type: details.line.vehicle.vehicle_type,
            departure: details.departure_time.text,
        })
        .collect();

    Ok(RouteSummary {
        polyline: points,
        duration: leg.duration.text,
        summary: route
            .summary
            .unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
        distance_km: leg.distance.value / 1000.0,
        transit_steps,
    })
}

// ─── Directions API payload ──────────────────────────────────

#[derive(Debug, Deserialize)]
struct DirectionsApiResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<ApiRoute>,
}

#[derive(Debug, Deserialize)]
struct ApiRoute {
    legs: Vec<ApiLeg>,
    overview_polyline: ApiPolyline,
    #[serde(default)]
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiPolyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct ApiLeg {
    duration: ApiText,
    distance: ApiDistance,
    steps: Vec<ApiStep>,
}

#[derive(Debug, Deserialize)]
struct ApiText {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiDistance {
    /// Meters
    value: f64,
}

#[derive(Debug, Deserialize)]
struct ApiStep {
    #[serde(default)]
    transit_details: Option<ApiTransitDetails>,
}

#[derive(Debug, Deserialize)]
struct ApiTransitDetails {
    line: ApiLine,
    departure_time: ApiText,
}

#[derive(Debug, Deserialize)]
struct ApiLine {
    short_name: String,
    vehicle: ApiVehicle,
}

#[derive(Debug, Deserialize)]
struct ApiVehicle {
    #[serde(rename = "type")]
    vehicle_type: String,
}

/// Errors from directions lookups. Logged, never returned to callers.
#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    #[error("Directions request failed: {0}")]
    Http(String),

    #[error("Directions API status {status}: {message}")]
    Status { status: String, message: String },

    #[error("Unexpected directions payload: {0}")]
    Payload(String),

    #[error("Failed to decode polyline: {0}")]
    Polyline(String),
}
