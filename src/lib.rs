// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Voya gateway: the HTTP edge between the trip planner frontend and its
//! upstream services.
//!
//! This crate forwards requests to the activities/itinerary backend,
//! shapes Google Directions routes for map rendering and persists saved
//! trips through a PostgREST storage API.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::TripDb;
use error::AppError;
use services::{build_http_client, AuthClient, DirectionsService, UpstreamClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: TripDb,
    pub backend: UpstreamClient,
    pub auth: AuthClient,
    pub directions: DirectionsService,
}

impl AppState {
    /// Build the state with one HTTP client shared by every upstream.
    pub fn new(config: Config, db: TripDb, http: reqwest::Client) -> Self {
        Self {
            backend: UpstreamClient::new(http.clone(), config.backend_url.clone()),
            auth: AuthClient::new(http.clone(), config.auth_url.clone()),
            directions: DirectionsService::new(
                http,
                config.directions_url.clone(),
                config.google_maps_api_key.clone(),
            ),
            config,
            db,
        }
    }

    /// Production wiring: PostgREST store and the bounded-timeout client.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let http = build_http_client()?;
        let db = TripDb::postgrest(http.clone(), &config.project_url, &config.api_key)?;
        Ok(Self::new(config, db, http))
    }
}
