// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catch-all forwarding to the activities/itinerary backend.
//!
//! Installed as the router fallback, so every explicitly routed path
//! (including `/get-directions`) takes precedence over forwarding.

use crate::error::Result;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Methods relayed to the backend; anything else is refused locally.
const FORWARDED_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

/// Forward an unmatched request to `{backend}{path}`.
pub async fn forward_unmatched(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response> {
    let method = request.method().clone();
    if !FORWARDED_METHODS.contains(&method) {
        return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
    }

    let url = state.backend.url_for(request.uri().path());
    state.backend.forward(request, method, &url).await
}
