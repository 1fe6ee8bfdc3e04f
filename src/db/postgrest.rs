// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PostgREST client for the `trips` and `activities` tables.
//!
//! Mutations that need ownership carry both `trip_id` and `user_id` in the
//! statement's filter and ask for the affected rows back, so a trip owned
//! by someone else is indistinguishable from a missing one.

use crate::db::tables;
use crate::error::AppError;
use crate::models::{ActivityRow, TripChanges, TripRow};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{de::DeserializeOwned, Serialize};

/// Ask PostgREST to return the affected rows.
const RETURN_REPRESENTATION: &str = "return=representation";

/// `column=eq.value` filter value.
fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

/// Filter selecting a trip only when it belongs to `user_id`.
pub fn owned_trip_filter(trip_id: i64, user_id: &str) -> [(&'static str, String); 2] {
    [("trip_id", eq(trip_id)), ("user_id", eq(user_id))]
}

/// PostgREST-backed trip store.
#[derive(Clone)]
pub struct PostgrestStore {
    http: reqwest::Client,
    rest_url: String,
    headers: HeaderMap,
}

impl PostgrestStore {
    /// Create a store for the project at `project_url`.
    pub fn new(http: reqwest::Client, project_url: &str, api_key: &str) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .map_err(|e| AppError::Database(format!("Invalid storage API key: {}", e)))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| AppError::Database(format!("Invalid storage API key: {}", e)))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        Ok(Self {
            http,
            rest_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            headers,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    // ─── Trip Operations ─────────────────────────────────────────

    pub async fn insert_trip(&self, trip: &TripRow) -> Result<TripRow, AppError> {
        let rows: Vec<TripRow> = self.insert(tables::TRIPS, trip).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::Database("Trip insert returned no rows".to_string()))
    }

    pub async fn trips_for_user(&self, user_id: &str) -> Result<Vec<TripRow>, AppError> {
        self.select(
            tables::TRIPS,
            &[("user_id", eq(user_id)), ("order", "trip_id.asc".to_string())],
        )
        .await
    }

    pub async fn get_trip(&self, trip_id: i64, user_id: &str) -> Result<Option<TripRow>, AppError> {
        let rows: Vec<TripRow> = self
            .select(tables::TRIPS, &owned_trip_filter(trip_id, user_id))
            .await?;
        Ok(rows.into_iter().next())
    }

    pub async fn update_trip(
        &self,
        trip_id: i64,
        user_id: &str,
        changes: &TripChanges,
    ) -> Result<Option<TripRow>, AppError> {
        let response = self
            .http
            .patch(self.table_url(tables::TRIPS))
            .headers(self.headers.clone())
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&owned_trip_filter(trip_id, user_id))
            .json(changes)
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let rows: Vec<TripRow> = read_rows(response).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn delete_trip(&self, trip_id: i64, user_id: &str) -> Result<bool, AppError> {
        let rows: Vec<TripRow> = self
            .delete(tables::TRIPS, &owned_trip_filter(trip_id, user_id))
            .await?;
        Ok(!rows.is_empty())
    }

    // ─── Activity Operations ─────────────────────────────────────

    pub async fn insert_activities(
        &self,
        activities: &[ActivityRow],
    ) -> Result<Vec<ActivityRow>, AppError> {
        self.insert(tables::ACTIVITIES, activities).await
    }

    pub async fn activities_for_trip(&self, trip_id: i64) -> Result<Vec<ActivityRow>, AppError> {
        self.select(
            tables::ACTIVITIES,
            &[("trip_id", eq(trip_id)), ("order", "id.asc".to_string())],
        )
        .await
    }

    pub async fn delete_activities(&self, trip_id: i64) -> Result<usize, AppError> {
        let rows: Vec<ActivityRow> = self
            .delete(tables::ACTIVITIES, &[("trip_id", eq(trip_id))])
            .await?;
        Ok(rows.len())
    }

    // ─── Helpers ─────────────────────────────────────────────────

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filter: &[(&str, String)],
    ) -> Result<Vec<T>, AppError> {
        let response = self
            .http
            .get(self.table_url(table))
            .headers(self.headers.clone())
            .query(&[("select", "*")])
            .query(filter)
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        read_rows(response).await
    }

    async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<Vec<T>, AppError> {
        let response = self
            .http
            .post(self.table_url(table))
            .headers(self.headers.clone())
            .header("Prefer", RETURN_REPRESENTATION)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        read_rows(response).await
    }

    async fn delete<T: DeserializeOwned>(
        &self,
        table: &str,
        filter: &[(&str, String)],
    ) -> Result<Vec<T>, AppError> {
        let response = self
            .http
            .delete(self.table_url(table))
            .headers(self.headers.clone())
            .header("Prefer", RETURN_REPRESENTATION)
            .query(filter)
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        read_rows(response).await
    }
}

/// Check the status and decode the returned rows.
async fn read_rows<T: DeserializeOwned>(response: reqwest::Response) -> Result<Vec<T>, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Database(format!("HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Database(format!("JSON parse error: {}", e)))
}
