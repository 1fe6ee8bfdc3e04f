// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tests for the validated `/activities` and `/itinerary` relays.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;
use voya_gateway::config::Config;

mod common;
use common::body_json;

async fn suggest(State(hits): State<Arc<AtomicUsize>>, Json(request): Json<Value>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "city": request["city"],
        "activities": [{ "title": "Old Town Walk" }, { "title": "Vistula Cruise" }]
    }))
    .into_response()
}

async fn broken(State(hits): State<Arc<AtomicUsize>>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    (StatusCode::INTERNAL_SERVER_ERROR, "model overloaded").into_response()
}

async fn app_with_backend() -> (Router, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let backend = Router::new()
        .route("/activities", post(suggest))
        .route("/itinerary", post(broken))
        .with_state(hits.clone());
    let backend_url = common::spawn_upstream(backend).await;

    let (app, _) = common::create_test_app_with_config(Config {
        backend_url,
        ..Config::test_default()
    });
    (app, hits)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_activities_relayed() {
    let (app, hits) = app_with_backend().await;

    let response = app
        .oneshot(post_json(
            "/activities",
            json!({ "city": "Warsaw", "timeOfDay": ["Morning"], "group": "Family" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["city"], "Warsaw");
    assert_eq!(body["activities"].as_array().unwrap().len(), 2);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_invalid_activity_request_not_relayed() {
    let (app, hits) = app_with_backend().await;

    let response = app
        .oneshot(post_json(
            "/activities",
            json!({ "city": "", "timeOfDay": [], "group": "Family" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "validation_error");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_rate_card_rejected() {
    let (app, hits) = app_with_backend().await;

    let response = app
        .oneshot(post_json("/itinerary", json!({ "city": "Warsaw" })))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_backend_failure_status_surfaced() {
    let (app, hits) = app_with_backend().await;

    let response = app
        .oneshot(post_json(
            "/itinerary",
            json!({
                "city": "Warsaw",
                "preferences": [{ "liked": ["Old Town Walk"], "disliked": ["Zoo"] }]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "upstream_error");
    assert_eq!(body["details"], "model overloaded");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
