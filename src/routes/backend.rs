// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Validated relays to the activities/itinerary backend.

use crate::error::Result;
use crate::routes::proxy::forward_unmatched;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Only POST is handled here; other methods on these paths are forwarded.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/activities", post(activities).fallback(forward_unmatched))
        .route("/itinerary", post(itinerary).fallback(forward_unmatched))
}

/// Search parameters for activity suggestions.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ActivityRequest {
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[serde(rename = "timeOfDay")]
    #[validate(length(min = 1))]
    pub time_of_day: Vec<String>,
    #[validate(length(min = 1, max = 50))]
    pub group: String,
}

/// Liked and disliked activities from one swipe session.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Preference {
    pub liked: Vec<String>,
    pub disliked: Vec<String>,
}

/// Preferences used to generate an itinerary.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RateCard {
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(nested)]
    pub preferences: Vec<Preference>,
}

/// Suggest activities for a city.
async fn activities(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ActivityRequest>,
) -> Result<Json<serde_json::Value>> {
    request.validate()?;
    tracing::info!(city = %request.city, group = %request.group, "Requesting activities");

    let reply = state.backend.post_json("/activities", &request).await?;
    Ok(Json(reply))
}

/// Generate an itinerary from rated activities.
async fn itinerary(
    State(state): State<Arc<AppState>>,
    Json(rate_card): Json<RateCard>,
) -> Result<Json<serde_json::Value>> {
    rate_card.validate()?;
    tracing::info!(
        city = %rate_card.city,
        preferences = rate_card.preferences.len(),
        "Requesting itinerary"
    );

    let reply = state.backend.post_json("/itinerary", &rate_card).await?;
    Ok(Json(reply))
}
