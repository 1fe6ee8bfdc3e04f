// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Directions and itinerary map models.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// `[latitude, longitude]`
pub type LatLng = [f64; 2];

/// Travel mode understood by the directions API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Walking,
    #[default]
    Transit,
}

impl TravelMode {
    /// Modes drawn on an itinerary map, in layer order.
    pub const ALL: [TravelMode; 3] = [TravelMode::Driving, TravelMode::Transit, TravelMode::Walking];

    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Transit => "transit",
        }
    }

    /// Capitalized name used in layer titles.
    pub fn label(self) -> &'static str {
        match self {
            TravelMode::Driving => "Driving",
            TravelMode::Walking => "Walking",
            TravelMode::Transit => "Transit",
        }
    }

    /// Line color of this mode's map layer.
    pub fn color(self) -> &'static str {
        match self {
            TravelMode::Driving => "red",
            TravelMode::Walking => "green",
            TravelMode::Transit => "blue",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /get-directions`.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRequest {
    pub origin: LatLng,
    pub destination: LatLng,
    #[serde(default)]
    pub mode: TravelMode,
}

/// One public transport leg of a transit route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TransitStep {
    pub line: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub departure: String,
}

/// A route reshaped for map rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RouteSummary {
    /// Decoded route geometry as `[lat, lng]` points
    pub polyline: Vec<LatLng>,
    pub duration: String,
    pub summary: String,
    pub distance_km: f64,
    pub transit_steps: Vec<TransitStep>,
}

/// Body of `POST /get-itinerary-map`.
#[derive(Debug, Clone, Deserialize)]
pub struct ItineraryMapRequest {
    pub city: String,
    #[serde(default)]
    pub itinerary: Vec<MapStop>,
}

/// A named place on the itinerary.
#[derive(Debug, Clone, Deserialize)]
pub struct MapStop {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: Option<LatLng>,
}

/// Fares shown on a layer's marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fares {
    Transit { subway: f64, bus: f64 },
    Taxi { estimate: f64 },
}

/// One route between two consecutive stops in one mode.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapLayer {
    pub name: String,
    pub mode: TravelMode,
    pub color: String,
    pub polyline: Vec<LatLng>,
    /// Popup anchor, the middle point of the polyline
    pub marker: LatLng,
    pub duration: String,
    pub summary: String,
    pub distance_km: f64,
    pub fares: Option<Fares>,
    pub transit_steps: Vec<TransitStep>,
}

/// Layers ready for the frontend map component.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ItineraryMap {
    pub center: LatLng,
    pub zoom: u8,
    pub layers: Vec<MapLayer>,
}
