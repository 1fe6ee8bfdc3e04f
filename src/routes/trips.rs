// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Saved trip routes (require a validated session).

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::trip::TripPatch;
use crate::models::{ActivityRow, ItineraryItem, SearchConfig, TripChanges, TripResponse, TripRow};
use crate::time_utils::{format_date, format_utc_rfc3339};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Cookie holding the frontend's current search context.
const SEARCH_CONFIG_COOKIE: &str = "searchConfig";

/// Trip routes. The auth middleware is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/save", post(save_trip))
        .route("/trips", get(list_trips))
        .route(
            "/trips/{id}",
            get(get_trip).put(edit_trip).delete(delete_trip),
        )
}

// ─── Save ────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct SaveTripRequest {
    #[validate(length(min = 1, message = "itinerary must not be empty"), nested)]
    pub itinerary: Vec<ItineraryItem>,
    #[validate(length(min = 1, max = 200))]
    #[serde(default)]
    pub custom_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveTripResponse {
    pub success: String,
    pub trip_id: i64,
}

/// Save an itinerary as a new trip.
///
/// Trip metadata comes from the `searchConfig` cookie. If the activities
/// cannot be stored, the trip row is removed again before failing.
async fn save_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    jar: CookieJar,
    Json(request): Json<SaveTripRequest>,
) -> Result<Json<SaveTripResponse>> {
    request.validate()?;

    let search = SearchConfig::from_cookie(jar.get(SEARCH_CONFIG_COOKIE).map(|c| c.value()));
    let now = chrono::Utc::now();
    let trip = TripRow {
        created_at: Some(format_utc_rfc3339(now)),
        ..search.to_trip(&user.user_id, request.custom_name, &format_date(now))
    };

    let saved = state.db.insert_trip(&trip).await?;
    let trip_id = saved
        .trip_id
        .ok_or_else(|| AppError::Database("Inserted trip has no id".to_string()))?;

    let rows: Vec<ActivityRow> = request
        .itinerary
        .iter()
        .map(|item| ActivityRow::from(item).for_insert(trip_id))
        .collect();

    let failure = match state.db.insert_activities(&rows).await {
        Ok(inserted) if !inserted.is_empty() => None,
        Ok(_) => Some(AppError::Database(
            "Failed to insert activities: no rows returned".to_string(),
        )),
        Err(e) => Some(e),
    };

    if let Some(err) = failure {
        discard_trip(&state, trip_id, &user.user_id).await;
        return Err(err);
    }

    tracing::info!(
        user_id = %user.user_id,
        trip_id,
        activities = rows.len(),
        city = %saved.city,
        "Trip saved"
    );

    Ok(Json(SaveTripResponse {
        success: "Trip and activities added successfully".to_string(),
        trip_id,
    }))
}

/// Remove a trip whose activities could not be stored.
async fn discard_trip(state: &AppState, trip_id: i64, user_id: &str) {
    match state.db.delete_trip(trip_id, user_id).await {
        Ok(_) => tracing::warn!(trip_id, "Discarded trip after failed activities insert"),
        Err(e) => tracing::error!(
            error = %e,
            trip_id,
            "Failed to discard trip after failed activities insert; trip row is orphaned"
        ),
    }
}

// ─── Read ────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct TripsResponse {
    pub user_id: String,
    pub trips: Vec<TripResponse>,
}

/// List the caller's trips with their activities.
async fn list_trips(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<TripsResponse>> {
    let trips = state.db.trips_for_user(&user.user_id).await?;
    tracing::debug!(user_id = %user.user_id, count = trips.len(), "Listing trips");

    let trips = try_join_all(trips.into_iter().map(|trip| with_activities(&state, trip))).await?;

    Ok(Json(TripsResponse {
        user_id: user.user_id,
        trips,
    }))
}

/// Get one of the caller's trips.
async fn get_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(trip_id): Path<i64>,
) -> Result<Json<TripResponse>> {
    let trip = state
        .db
        .get_trip(trip_id, &user.user_id)
        .await?
        .ok_or_else(|| trip_not_found(trip_id))?;

    Ok(Json(with_activities(&state, trip).await?))
}

async fn with_activities(state: &AppState, trip: TripRow) -> Result<TripResponse> {
    let trip_id = trip.trip_id.unwrap_or_default();
    let activities = state.db.activities_for_trip(trip_id).await?;
    Ok(TripResponse::from_rows(trip, &activities))
}

/// Nonexistent and not-owned trips share this error.
fn trip_not_found(trip_id: i64) -> AppError {
    AppError::NotFound(format!("Trip {} not found", trip_id))
}

// ─── Edit ────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, Validate)]
pub struct TripUpdateRequest {
    #[serde(default)]
    #[validate(nested)]
    pub trip: Option<TripPatch>,
    /// Replaces every activity of the trip when present
    #[serde(default)]
    #[validate(nested)]
    pub activities: Option<Vec<ItineraryItem>>,
}

/// Update trip fields and optionally replace its activities.
async fn edit_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(trip_id): Path<i64>,
    Json(request): Json<TripUpdateRequest>,
) -> Result<Json<TripResponse>> {
    request.validate()?;

    let changes = TripChanges::from(request.trip.unwrap_or_default());
    let trip = if changes.is_empty() {
        state.db.get_trip(trip_id, &user.user_id).await?
    } else {
        state
            .db
            .update_trip(trip_id, &user.user_id, &changes)
            .await?
    }
    .ok_or_else(|| trip_not_found(trip_id))?;

    if let Some(items) = request.activities {
        let removed = state.db.delete_activities(trip_id).await?;
        let rows: Vec<ActivityRow> = items
            .iter()
            .map(|item| ActivityRow::from(item).for_insert(trip_id))
            .collect();
        if !rows.is_empty() {
            state.db.insert_activities(&rows).await?;
        }

        tracing::info!(
            trip_id,
            removed,
            inserted = rows.len(),
            "Replaced trip activities"
        );
    }

    tracing::info!(user_id = %user.user_id, trip_id, "Trip updated");
    Ok(Json(with_activities(&state, trip).await?))
}

// ─── Delete ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteTripResponse {
    pub success: bool,
    pub trip_id: i64,
}

/// Delete a trip and its activities.
async fn delete_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(trip_id): Path<i64>,
) -> Result<Json<DeleteTripResponse>> {
    state
        .db
        .get_trip(trip_id, &user.user_id)
        .await?
        .ok_or_else(|| trip_not_found(trip_id))?;

    let removed = state.db.delete_activities(trip_id).await?;
    if !state.db.delete_trip(trip_id, &user.user_id).await? {
        return Err(trip_not_found(trip_id));
    }

    tracing::info!(
        user_id = %user.user_id,
        trip_id,
        activities = removed,
        "Trip deleted"
    );

    Ok(Json(DeleteTripResponse {
        success: true,
        trip_id,
    }))
}
