// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Every upstream the gateway talks to is supplied externally; only the
//! port, the frontend origin and the maps key have defaults.

use std::env;
use std::time::Duration;

/// Timeout applied to every outbound call (backend, auth, storage, maps).
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(120);

/// Google Directions JSON endpoint.
pub const DIRECTIONS_API_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Activities/itinerary backend base URL
    pub backend_url: String,
    /// Auth service base URL (exposes `/validate`)
    pub auth_url: String,
    /// Storage project URL (PostgREST lives under `/rest/v1`)
    pub project_url: String,
    /// Storage API key
    pub api_key: String,
    /// Google Maps API key; lookups soft-fail without it
    pub google_maps_api_key: String,
    /// Directions endpoint, overridable for tests
    pub directions_url: String,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Fixed configuration for tests. Upstream URLs point nowhere.
    pub fn test_default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:9".to_string(),
            auth_url: "http://127.0.0.1:9".to_string(),
            project_url: "http://127.0.0.1:9".to_string(),
            api_key: "test_api_key".to_string(),
            google_maps_api_key: "test_maps_key".to_string(),
            directions_url: "http://127.0.0.1:9/directions/json".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 5000,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let google_maps_api_key = env::var("GOOGLE_MAPS_API_KEY").unwrap_or_default();
        if google_maps_api_key.is_empty() {
            tracing::warn!("GOOGLE_MAPS_API_KEY not set, directions lookups will return no routes");
        }

        Ok(Self {
            backend_url: required_url("BACKEND_URL")?,
            auth_url: required_url("AUTH_URL")?,
            project_url: required_url("PROJECT_URL")?,
            api_key: env::var("API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("API_KEY"))?,
            google_maps_api_key: google_maps_api_key.trim().to_string(),
            directions_url: DIRECTIONS_API_URL.to_string(),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "https://voya-trips.com".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
        })
    }
}

/// Read a base URL, dropping any trailing slash so paths can be appended.
fn required_url(name: &'static str) -> Result<String, ConfigError> {
    let value = env::var(name).map_err(|_| ConfigError::Missing(name))?;
    let value = value.trim().trim_end_matches('/').to_string();
    if value.is_empty() {
        return Err(ConfigError::Missing(name));
    }
    Ok(value)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
