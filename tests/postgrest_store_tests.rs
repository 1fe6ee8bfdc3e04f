// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PostgREST store tests against a fake REST endpoint.
//!
//! The fake records every request and answers with canned rows, which is
//! enough to check credentials, owner filters and the save compensation.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use voya_gateway::config::Config;
use voya_gateway::db::TripDb;
use voya_gateway::models::TripChanges;
use voya_gateway::routes::create_router;
use voya_gateway::AppState;

mod common;
use common::{body_json, session, ALICE_TOKEN};

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: String,
    apikey: Option<String>,
    authorization: Option<String>,
    prefer: Option<String>,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Trip inserts get id 41; every other statement matches no rows.
async fn fake_rest(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    log.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().unwrap_or("").to_string(),
        apikey: header_value(&headers, "apikey"),
        authorization: header_value(&headers, "authorization"),
        prefer: header_value(&headers, "prefer"),
    });

    if method == Method::POST && uri.path() == "/rest/v1/trips" {
        let mut row: Value = match serde_json::from_slice(&body) {
            Ok(row) => row,
            Err(_) => return StatusCode::BAD_REQUEST.into_response(),
        };
        row["trip_id"] = json!(41);
        return (StatusCode::CREATED, Json(json!([row]))).into_response();
    }

    Json(json!([])).into_response()
}

async fn store_with_fake_rest() -> (TripDb, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let rest = Router::new().fallback(fake_rest).with_state(log.clone());
    let project_url = common::spawn_upstream(rest).await;

    let db = TripDb::postgrest(reqwest::Client::new(), &project_url, "service-key").unwrap();
    (db, log)
}

fn recorded(log: &Log) -> Vec<Recorded> {
    log.lock().unwrap().clone()
}

#[tokio::test]
async fn test_requests_carry_credentials_and_owner_filter() {
    let (db, log) = store_with_fake_rest().await;

    let trip = db.get_trip(41, "alice").await.unwrap();
    assert!(trip.is_none());

    let requests = recorded(&log);
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "/rest/v1/trips");
    assert!(request.query.contains("select=*") || request.query.contains("select=%2A"));
    assert!(request.query.contains("trip_id=eq.41"));
    assert!(request.query.contains("user_id=eq.alice"));
    assert_eq!(request.apikey.as_deref(), Some("service-key"));
    assert_eq!(request.authorization.as_deref(), Some("Bearer service-key"));
}

#[tokio::test]
async fn test_update_of_unmatched_trip_is_none() {
    let (db, log) = store_with_fake_rest().await;

    let changes = TripChanges {
        custom_name: Some("Renamed".to_string()),
        ..Default::default()
    };
    let updated = db.update_trip(41, "mallory", &changes).await.unwrap();
    assert!(updated.is_none());

    let requests = recorded(&log);
    assert_eq!(requests[0].method, Method::PATCH);
    assert!(requests[0].query.contains("user_id=eq.mallory"));
    assert_eq!(requests[0].prefer.as_deref(), Some("return=representation"));
}

#[tokio::test]
async fn test_delete_reports_whether_a_row_matched() {
    let (db, log) = store_with_fake_rest().await;

    assert!(!db.delete_trip(41, "alice").await.unwrap());
    assert_eq!(db.delete_activities(41).await.unwrap(), 0);

    let requests = recorded(&log);
    assert_eq!(requests[0].method, Method::DELETE);
    assert_eq!(requests[0].path, "/rest/v1/trips");
    assert_eq!(requests[1].path, "/rest/v1/activities");
    assert!(requests[1].query.contains("trip_id=eq.41"));
}

#[tokio::test]
async fn test_save_discards_trip_when_activities_not_stored() {
    let (db, log) = store_with_fake_rest().await;
    let auth_url = common::spawn_upstream(common::fake_auth()).await;

    let state = Arc::new(AppState::new(
        Config {
            auth_url,
            ..Config::test_default()
        },
        db,
        reqwest::Client::new(),
    ));
    let app = create_router(state);

    let item = json!({
        "title": "Old Town Walk",
        "transport": false,
        "start": "9:00 AM",
        "end": "11:00 AM",
        "description": "Guided walk",
        "price": 15.0,
        "theme": "History",
        "requires_booking": true,
        "image_link": [],
        "duration": 120,
        "id": 1
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/save")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, session(ALICE_TOKEN))
                .body(Body::from(json!({ "itinerary": [item] }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "database_error");

    let requests = recorded(&log);
    let steps: Vec<(Method, &str)> = requests
        .iter()
        .map(|r| (r.method.clone(), r.path.as_str()))
        .collect();
    assert_eq!(
        steps,
        vec![
            (Method::POST, "/rest/v1/trips"),
            (Method::POST, "/rest/v1/activities"),
            (Method::DELETE, "/rest/v1/trips"),
        ]
    );

    let discard = &requests[2];
    assert!(discard.query.contains("trip_id=eq.41"));
    assert!(discard.query.contains("user_id=eq.alice"));
}

/// Rows as stored by an older client that never wrote some columns.
async fn rows_with_nulls(uri: Uri) -> Json<Value> {
    match uri.path() {
        "/rest/v1/trips" => Json(json!([{
            "trip_id": 7,
            "user_id": "alice",
            "city": "Warsaw",
            "custom_name": "Trip to Warsaw",
            "date_of_trip": "2025-03-15",
            "created_at": null,
            "time_of_day": null,
            "group": null
        }])),
        "/rest/v1/activities" => Json(json!([{
            "id": 3,
            "trip_id": 7,
            "title": "Old Town Walk",
            "start": "9:00 AM",
            "end": "11:00 AM",
            "description": null,
            "price": 0,
            "theme": null,
            "transport": null,
            "transport_mode": null,
            "requires_booking": false,
            "booking_url": null,
            "weather": null,
            "temperature": null,
            "image_link": null,
            "duration": 120,
            "latitude": null,
            "longitude": null
        }])),
        _ => Json(json!([])),
    }
}

#[tokio::test]
async fn test_list_trips_tolerates_null_columns() {
    let project_url = common::spawn_upstream(Router::new().fallback(rows_with_nulls)).await;
    let auth_url = common::spawn_upstream(common::fake_auth()).await;
    let db = TripDb::postgrest(reqwest::Client::new(), &project_url, "service-key").unwrap();

    let app = create_router(Arc::new(AppState::new(
        Config {
            auth_url,
            ..Config::test_default()
        },
        db,
        reqwest::Client::new(),
    )));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/trips")
                .header(header::COOKIE, session(ALICE_TOKEN))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let trip = &body["trips"][0];
    assert_eq!(trip["trip_id"], 7);
    assert_eq!(trip["time_of_day"], json!([]));
    assert_eq!(trip["group"], "");

    let activity = &trip["activities"][0];
    assert_eq!(activity["title"], "Old Town Walk");
    assert_eq!(activity["transport"], false);
    assert_eq!(activity["description"], "");
    assert_eq!(activity["image_link"], json!([]));
}
