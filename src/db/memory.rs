// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process trip store for tests and local development.

use crate::error::AppError;
use crate::models::{ActivityRow, TripChanges, TripRow};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    trips: Vec<TripRow>,
    activities: Vec<ActivityRow>,
    last_trip_id: i64,
    last_activity_id: i64,
}

/// Trip store kept in memory. Ids are generated like a serial column.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_trip(&self, trip: &TripRow) -> Result<TripRow, AppError> {
        let mut tables = self.tables.write().await;
        tables.last_trip_id += 1;

        let mut row = trip.clone();
        row.trip_id = Some(tables.last_trip_id);
        tables.trips.push(row.clone());
        Ok(row)
    }

    pub async fn trips_for_user(&self, user_id: &str) -> Result<Vec<TripRow>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .trips
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    pub async fn get_trip(&self, trip_id: i64, user_id: &str) -> Result<Option<TripRow>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .trips
            .iter()
            .find(|t| is_owned(t, trip_id, user_id))
            .cloned())
    }

    pub async fn update_trip(
        &self,
        trip_id: i64,
        user_id: &str,
        changes: &TripChanges,
    ) -> Result<Option<TripRow>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .trips
            .iter_mut()
            .find(|t| is_owned(t, trip_id, user_id))
            .map(|trip| {
                changes.apply_to(trip);
                trip.clone()
            }))
    }

    pub async fn delete_trip(&self, trip_id: i64, user_id: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.trips.len();
        tables.trips.retain(|t| !is_owned(t, trip_id, user_id));
        Ok(tables.trips.len() < before)
    }

    pub async fn insert_activities(
        &self,
        activities: &[ActivityRow],
    ) -> Result<Vec<ActivityRow>, AppError> {
        let mut tables = self.tables.write().await;

        let mut inserted = Vec::with_capacity(activities.len());
        for activity in activities {
            if activity.trip_id.is_none() {
                return Err(AppError::Database(
                    "activities.trip_id must not be null".to_string(),
                ));
            }
            tables.last_activity_id += 1;
            let mut row = activity.clone();
            row.id = Some(tables.last_activity_id);
            inserted.push(row);
        }

        tables.activities.extend(inserted.iter().cloned());
        Ok(inserted)
    }

    pub async fn activities_for_trip(&self, trip_id: i64) -> Result<Vec<ActivityRow>, AppError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<ActivityRow> = tables
            .activities
            .iter()
            .filter(|a| a.trip_id == Some(trip_id))
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.id);
        Ok(rows)
    }

    pub async fn delete_activities(&self, trip_id: i64) -> Result<usize, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.activities.len();
        tables.activities.retain(|a| a.trip_id != Some(trip_id));
        Ok(before - tables.activities.len())
    }
}

fn is_owned(trip: &TripRow, trip_id: i64, user_id: &str) -> bool {
    trip.trip_id == Some(trip_id) && trip.user_id == user_id
}
