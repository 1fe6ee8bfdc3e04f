// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer for trips and their activities.
//!
//! Production goes through PostgREST; tests and local runs can use the
//! in-memory store. Both expose the same typed operations.

pub mod memory;
pub mod postgrest;

pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;

use crate::error::AppError;
use crate::models::{ActivityRow, TripChanges, TripRow};

/// Table names as constants.
pub mod tables {
    pub const TRIPS: &str = "trips";
    pub const ACTIVITIES: &str = "activities";
}

#[derive(Clone)]
enum Backend {
    Postgrest(PostgrestStore),
    Memory(MemoryStore),
}

/// Trip store handle shared by all requests.
#[derive(Clone)]
pub struct TripDb {
    backend: Backend,
}

/// Dispatch an operation to the configured backend.
macro_rules! dispatch {
    ($self:ident, $op:ident ( $($arg:expr),* )) => {
        match &$self.backend {
            Backend::Postgrest(store) => store.$op($($arg),*).await,
            Backend::Memory(store) => store.$op($($arg),*).await,
        }
    };
}

impl TripDb {
    /// Connect to the PostgREST API of the storage project.
    pub fn postgrest(
        http: reqwest::Client,
        project_url: &str,
        api_key: &str,
    ) -> Result<Self, AppError> {
        let store = PostgrestStore::new(http, project_url, api_key)?;
        tracing::info!(project = project_url, "Using PostgREST trip store");
        Ok(Self {
            backend: Backend::Postgrest(store),
        })
    }

    /// Create an empty in-memory store.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(MemoryStore::new()),
        }
    }

    // ─── Trip Operations ─────────────────────────────────────────

    /// Insert a trip and return it with its generated id.
    pub async fn insert_trip(&self, trip: &TripRow) -> Result<TripRow, AppError> {
        dispatch!(self, insert_trip(trip))
    }

    /// All trips owned by `user_id`.
    pub async fn trips_for_user(&self, user_id: &str) -> Result<Vec<TripRow>, AppError> {
        dispatch!(self, trips_for_user(user_id))
    }

    /// A trip, only if owned by `user_id`.
    pub async fn get_trip(&self, trip_id: i64, user_id: &str) -> Result<Option<TripRow>, AppError> {
        dispatch!(self, get_trip(trip_id, user_id))
    }

    /// Apply `changes` to a trip owned by `user_id`.
    /// `None` when no such trip exists for that user.
    pub async fn update_trip(
        &self,
        trip_id: i64,
        user_id: &str,
        changes: &TripChanges,
    ) -> Result<Option<TripRow>, AppError> {
        dispatch!(self, update_trip(trip_id, user_id, changes))
    }

    /// Delete a trip owned by `user_id`; `false` if nothing was deleted.
    pub async fn delete_trip(&self, trip_id: i64, user_id: &str) -> Result<bool, AppError> {
        dispatch!(self, delete_trip(trip_id, user_id))
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// Insert activity rows, returning them with their generated ids.
    pub async fn insert_activities(
        &self,
        activities: &[ActivityRow],
    ) -> Result<Vec<ActivityRow>, AppError> {
        dispatch!(self, insert_activities(activities))
    }

    /// Activities of a trip ordered by id.
    pub async fn activities_for_trip(&self, trip_id: i64) -> Result<Vec<ActivityRow>, AppError> {
        dispatch!(self, activities_for_trip(trip_id))
    }

    /// Delete every activity of a trip, returning how many were removed.
    pub async fn delete_activities(&self, trip_id: i64) -> Result<usize, AppError> {
        dispatch!(self, delete_activities(trip_id))
    }
}
