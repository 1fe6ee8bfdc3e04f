// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Directions and itinerary map routes.
//!
//! Both answer 200 with an `error` field when no route can be produced.

use crate::models::directions::{
    DirectionsRequest, ItineraryMap, ItineraryMapRequest, RouteSummary,
};
use crate::services::build_itinerary_map;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/get-directions", post(get_directions))
        .route("/get-itinerary-map", post(get_itinerary_map))
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum DirectionsResponse {
    Routes { routes: Vec<RouteSummary> },
    Error { error: String },
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum ItineraryMapResponse {
    Map(ItineraryMap),
    Error { error: String },
}

/// Routes between two points for one travel mode.
async fn get_directions(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DirectionsRequest>,
) -> Json<DirectionsResponse> {
    let routes = state
        .directions
        .get_directions(request.origin, request.destination, request.mode)
        .await;

    Json(match routes {
        Some(routes) => DirectionsResponse::Routes { routes },
        None => DirectionsResponse::Error {
            error: "No route found".to_string(),
        },
    })
}

/// Layers for every leg of an itinerary in every travel mode.
async fn get_itinerary_map(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ItineraryMapRequest>,
) -> Json<ItineraryMapResponse> {
    Json(match build_itinerary_map(&state.directions, &request).await {
        Ok(map) => ItineraryMapResponse::Map(map),
        Err(e) => ItineraryMapResponse::Error {
            error: e.to_string(),
        },
    })
}
