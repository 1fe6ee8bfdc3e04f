// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared HTTP client for the activities/itinerary backend.
//!
//! Handles:
//! - JSON relays for validated payloads (`/activities`, `/itinerary`)
//! - Verbatim request forwarding for the catch-all route
//!
//! Non-2xx responses become [`AppError::Upstream`] carrying the upstream
//! status and body text.

use crate::config::UPSTREAM_TIMEOUT;
use crate::error::{AppError, Result};
use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{header, HeaderMap, HeaderName, Method},
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

/// Largest inbound body the forwarder will buffer.
const MAX_FORWARD_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Headers that describe a single connection and are not relayed.
const HOP_BY_HOP_HEADERS: [HeaderName; 6] = [
    header::CONNECTION,
    header::TRANSFER_ENCODING,
    header::TE,
    header::TRAILER,
    header::UPGRADE,
    header::PROXY_AUTHENTICATE,
];

/// Build the process-wide client with the upstream timeout applied.
pub fn build_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .build()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e)))
}

/// Client for the activities/itinerary backend.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Backend URL for a path starting with `/`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON payload to `path` and return the backend's JSON reply.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<serde_json::Value> {
        let url = self.url_for(path);
        tracing::debug!(url = %url, "Relaying payload to backend");

        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(AppError::from_transport)?;

        if !response.status().is_success() {
            return Err(AppError::from_upstream(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Unreachable(format!("Invalid JSON from backend: {}", e)))
    }

    /// Re-issue `request` against `url` with `method` and relay the reply.
    ///
    /// The body is forwarded as JSON when it parses, otherwise dropped.
    /// Query string and cookies are carried over unmodified. The upstream
    /// status, headers and bytes are returned without reinterpretation.
    pub async fn forward(&self, request: Request, method: Method, url: &str) -> Result<Response> {
        let (parts, body) = request.into_parts();

        let raw = axum::body::to_bytes(body, MAX_FORWARD_BODY_BYTES)
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {}", e)))?;
        let json = parse_json_body(&raw);

        let target = match parts.uri.query() {
            Some(query) => format!("{}?{}", url, query),
            None => url.to_string(),
        };

        let mut outbound = self.http.request(method.clone(), &target);
        if let Some(cookie) = cookie_header(&parts.headers) {
            outbound = outbound.header(header::COOKIE, cookie);
        }
        if let Some(json) = &json {
            outbound = outbound.json(json);
        }

        tracing::debug!(
            method = %method,
            url = %target,
            has_body = json.is_some(),
            "Forwarding request"
        );

        let response = outbound.send().await.map_err(AppError::from_transport)?;
        if !response.status().is_success() {
            return Err(AppError::from_upstream(response).await);
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(AppError::from_transport)?;

        Ok(relay_response(status, &headers, bytes))
    }
}

/// Parse a request body as JSON, `None` if empty or malformed.
pub fn parse_json_body(raw: &[u8]) -> Option<serde_json::Value> {
    if raw.is_empty() {
        return None;
    }
    match serde_json::from_slice(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(error = %e, "Forwarding request without malformed JSON body");
            None
        }
    }
}

/// Rebuild a single `Cookie` header from every inbound cookie.
fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    let pairs: Vec<String> = jar
        .iter()
        .map(|c| format!("{}={}", c.name(), c.value()))
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}

fn relay_response(status: axum::http::StatusCode, headers: &HeaderMap, bytes: Bytes) -> Response {
    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;

    let relayed = response.headers_mut();
    for (name, value) in headers {
        if !HOP_BY_HOP_HEADERS.contains(name) {
            relayed.append(name.clone(), value.clone());
        }
    }

    response
}
