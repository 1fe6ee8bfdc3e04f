// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use voya_gateway::config::Config;
use voya_gateway::db::TripDb;
use voya_gateway::routes::create_router;
use voya_gateway::AppState;

/// Session tokens accepted by the fake auth service.
#[allow(dead_code)]
pub const ALICE_TOKEN: &str = "alice-token";
#[allow(dead_code)]
pub const BOB_TOKEN: &str = "bob-token";

/// Serve `router` on an ephemeral local port and return its base URL.
#[allow(dead_code)]
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake upstream");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Fake auth service: `alice-token` is user `alice`, `bob-token` is `bob`.
#[allow(dead_code)]
pub fn fake_auth() -> Router {
    async fn validate(headers: HeaderMap) -> Response {
        let cookie = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        let user_id = match cookie {
            c if c == format!("token={}", ALICE_TOKEN) => "alice",
            c if c == format!("token={}", BOB_TOKEN) => "bob",
            _ => return (StatusCode::UNAUTHORIZED, "invalid token").into_response(),
        };

        Json(serde_json::json!({ "user_id": user_id })).into_response()
    }

    Router::new().route("/validate", get(validate))
}

/// Create a test app with an in-memory store and the given config.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        config,
        TripDb::in_memory(),
        reqwest::Client::new(),
    ));
    (create_router(state.clone()), state)
}

/// Create a test app whose auth service is the fake one.
#[allow(dead_code)]
pub async fn create_test_app() -> (Router, Arc<AppState>) {
    let auth_url = spawn_upstream(fake_auth()).await;
    let config = Config {
        auth_url,
        ..Config::test_default()
    };
    create_test_app_with_config(config)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Cookie header for a session token.
#[allow(dead_code)]
pub fn session(token: &str) -> String {
    format!("token={}", token)
}
