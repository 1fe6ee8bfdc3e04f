// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Builds map layers for an itinerary: one route per consecutive pair of
//! stops and per travel mode, annotated with fares where the city is known.

use crate::models::directions::{
    Fares, ItineraryMap, ItineraryMapRequest, LatLng, MapLayer, RouteSummary, TravelMode,
};
use crate::services::DirectionsService;
use futures_util::future::join_all;

const DEFAULT_ZOOM: u8 = 13;

struct TaxiFare {
    base_fare: f64,
    per_km: f64,
}

struct TransitFare {
    bus: f64,
    subway: f64,
}

fn taxi_fare(city: &str) -> Option<TaxiFare> {
    let (base_fare, per_km) = match city {
        "New York City" => (3.00, 1.50),
        "London" => (3.20, 2.00),
        "San Francisco" => (3.50, 2.25),
        _ => return None,
    };
    Some(TaxiFare { base_fare, per_km })
}

fn transit_fare(city: &str) -> Option<TransitFare> {
    let (bus, subway) = match city {
        "New York City" => (2.75, 2.75),
        "London" => (1.75, 2.40),
        "San Francisco" => (3.00, 3.50),
        _ => return None,
    };
    Some(TransitFare { bus, subway })
}

/// Fares to show for a route in `city`.
pub fn fares_for(city: &str, mode: TravelMode, distance_km: f64) -> Option<Fares> {
    match mode {
        TravelMode::Transit => {
            transit_fare(city).map(|f| Fares::Transit {
                subway: f.subway,
                bus: f.bus,
            })
        }
        TravelMode::Driving => taxi_fare(city).map(|f| {
            let estimate = f.base_fare + f.per_km * distance_km;
            Fares::Taxi {
                estimate: (estimate * 100.0).round() / 100.0,
            }
        }),
        TravelMode::Walking => None,
    }
}

/// Why an itinerary could not be mapped.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Itinerary is missing")]
    MissingItinerary,

    #[error("Invalid itinerary format")]
    InvalidFormat,
}

/// Look up every leg of the itinerary and assemble the map layers.
///
/// Legs with no available route are left out.
pub async fn build_itinerary_map(
    directions: &DirectionsService,
    request: &ItineraryMapRequest,
) -> Result<ItineraryMap, MapError> {
    let first = request.itinerary.first().ok_or(MapError::MissingItinerary)?;
    let center = first.location.ok_or(MapError::InvalidFormat)?;

    let stops = request
        .itinerary
        .iter()
        .map(|stop| stop.location.map(|loc| (stop.name.as_str(), loc)))
        .collect::<Option<Vec<(&str, LatLng)>>>()
        .ok_or(MapError::InvalidFormat)?;

    let lookups = stops.windows(2).flat_map(move |pair| {
        let (from_name, from) = pair[0];
        let (to_name, to) = pair[1];
        TravelMode::ALL.into_iter().map(move |mode| async move {
            directions
                .get_directions(from, to, mode)
                .await
                .and_then(|routes| routes.into_iter().next())
                .and_then(|route| layer_for(&request.city, mode, from_name, to_name, route))
        })
    });

    let layers: Vec<MapLayer> = join_all(lookups).await.into_iter().flatten().collect();

    tracing::info!(
        city = %request.city,
        stops = stops.len(),
        layers = layers.len(),
        "Built itinerary map"
    );

    Ok(ItineraryMap {
        center,
        zoom: DEFAULT_ZOOM,
        layers,
    })
}

fn layer_for(
    city: &str,
    mode: TravelMode,
    from: &str,
    to: &str,
    route: RouteSummary,
) -> Option<MapLayer> {
    let marker = *route.polyline.get(route.polyline.len() / 2)?;

    Some(MapLayer {
        name: format!("{} | {} → {}", mode.label(), from, to),
        mode,
        color: mode.color().to_string(),
        marker,
        fares: fares_for(city, mode, route.distance_km),
        polyline: route.polyline,
        duration: route.duration,
        summary: route.summary,
        distance_km: route.distance_km,
        transit_steps: route.transit_steps,
    })
}
