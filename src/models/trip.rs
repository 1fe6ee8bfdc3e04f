// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trip model for storage and API.

use crate::models::itinerary::{join_list, null_as_default, split_list, ActivityRow, ItineraryItem};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const DEFAULT_CITY: &str = "Unknown";
const DEFAULT_TIME_OF_DAY: &str = "Morning,Afternoon,Evening";
const DEFAULT_GROUP: &str = "Solo";

/// Row of the `trips` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRow {
    /// Generated by storage, absent on insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<i64>,
    /// Owning user
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_name: String,
    /// Day the trip takes place (YYYY-MM-DD)
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_of_trip: String,
    /// When the trip was saved (RFC 3339)
    #[serde(default)]
    pub created_at: Option<String>,
    /// Comma-joined times of day
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_of_day: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group: String,
}

/// Partial trip update. Only present fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_trip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl TripChanges {
    pub fn is_empty(&self) -> bool {
        self.city.is_none()
            && self.custom_name.is_none()
            && self.date_of_trip.is_none()
            && self.time_of_day.is_none()
            && self.group.is_none()
    }

    /// Overwrite the fields of `trip` that are present.
    pub fn apply_to(&self, trip: &mut TripRow) {
        if let Some(city) = &self.city {
            trip.city = city.clone();
        }
        if let Some(name) = &self.custom_name {
            trip.custom_name = name.clone();
        }
        if let Some(date) = &self.date_of_trip {
            trip.date_of_trip = date.clone();
        }
        if let Some(time_of_day) = &self.time_of_day {
            trip.time_of_day = time_of_day.clone();
        }
        if let Some(group) = &self.group {
            trip.group = group.clone();
        }
    }
}

/// Trip fields accepted on edit; all optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TripPatch {
    #[validate(length(min = 1))]
    pub city: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub custom_name: Option<String>,
    pub date_of_trip: Option<String>,
    pub time_of_day: Option<Vec<String>>,
    pub group: Option<String>,
}

impl From<TripPatch> for TripChanges {
    fn from(patch: TripPatch) -> Self {
        Self {
            city: patch.city,
            custom_name: patch.custom_name,
            date_of_trip: patch.date_of_trip,
            time_of_day: patch.time_of_day.as_deref().and_then(join_list),
            group: patch.group,
        }
    }
}

/// Search context the frontend keeps in the `searchConfig` cookie.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(rename = "timeOfDay", default)]
    pub time_of_day: Option<Vec<String>>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl SearchConfig {
    /// Parse the cookie value. The frontend may URL-encode it; anything
    /// unparseable is treated as an empty config.
    pub fn from_cookie(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return Self::default();
        };

        if let Ok(config) = serde_json::from_str::<Self>(raw) {
            return config;
        }

        urlencoding::decode(raw)
            .ok()
            .and_then(|decoded| serde_json::from_str::<Self>(&decoded).ok())
            .unwrap_or_else(|| {
                tracing::debug!("Ignoring malformed searchConfig cookie");
                Self::default()
            })
    }

    /// Build the trip row to save for `user_id`, filling the defaults.
    pub fn to_trip(&self, user_id: &str, custom_name: Option<String>, today: &str) -> TripRow {
        let city = self
            .city
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CITY.to_string());

        let time_of_day = self
            .time_of_day
            .as_deref()
            .and_then(join_list)
            .unwrap_or_else(|| DEFAULT_TIME_OF_DAY.to_string());

        TripRow {
            trip_id: None,
            user_id: user_id.to_string(),
            custom_name: custom_name.unwrap_or_else(|| format!("Trip to {}", city)),
            city,
            date_of_trip: self.date.clone().unwrap_or_else(|| today.to_string()),
            created_at: None,
            time_of_day,
            group: self
                .group
                .clone()
                .unwrap_or_else(|| DEFAULT_GROUP.to_string()),
        }
    }
}

/// Trip as returned to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TripResponse {
    pub trip_id: i64,
    pub city: String,
    pub custom_name: String,
    pub date_of_trip: String,
    pub created_at: Option<String>,
    pub time_of_day: Vec<String>,
    pub group: String,
    pub activities: Vec<ItineraryItem>,
}

impl TripResponse {
    pub fn from_rows(trip: TripRow, activities: &[ActivityRow]) -> Self {
        Self {
            trip_id: trip.trip_id.unwrap_or_default(),
            city: trip.city,
            custom_name: trip.custom_name,
            date_of_trip: trip.date_of_trip,
            created_at: trip.created_at,
            time_of_day: split_list(Some(&trip.time_of_day)),
            group: trip.group,
            activities: activities.iter().map(ItineraryItem::from).collect(),
        }
    }
}
