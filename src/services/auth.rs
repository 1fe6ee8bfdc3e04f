// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session validation against the external auth service.

use crate::error::{AppError, Result};
use axum::http::{header, StatusCode};
use serde::Deserialize;

/// Name of the session cookie issued by the auth service.
pub const SESSION_COOKIE: &str = "token";

/// Client for the auth service's `/validate` endpoint.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

/// Body returned by `/validate` on success.
#[derive(Debug, Deserialize)]
struct ValidateResponse {
    #[serde(default)]
    user_id: Option<serde_json::Value>,
}

impl AuthClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Resolve a session token to the caller's user id.
    ///
    /// Any status other than 200 means the session is not valid.
    pub async fn validate(&self, token: &str) -> Result<String> {
        let url = format!("{}/validate", self.base_url);

        let response = self
            .http
            .get(&url)
            .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, token))
            .send()
            .await
            .map_err(AppError::from_transport)?;

        if response.status() != StatusCode::OK {
            tracing::debug!(status = response.status().as_u16(), "Session rejected by auth service");
            return Err(AppError::InvalidToken);
        }

        let body: ValidateResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "Auth service returned an unreadable body");
            AppError::InvalidToken
        })?;

        user_id_from(body.user_id).ok_or(AppError::InvalidToken)
    }
}

/// Accept both string and numeric user ids.
fn user_id_from(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
