// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Itinerary items and their `activities` table representation.
//!
//! List-valued fields are stored as comma-joined strings. An element that
//! itself contains a comma does not survive the round trip.

use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Separator for list fields flattened into a single column.
const LIST_SEPARATOR: &str = ",";

/// Split a comma-joined column back into its elements.
/// Absent or empty columns give an empty list.
pub fn split_list(value: Option<&str>) -> Vec<String> {
    match value {
        Some(v) if !v.is_empty() => v.split(LIST_SEPARATOR).map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// Join list elements into a single column, `None` when there are none.
pub fn join_list(values: &[String]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.join(LIST_SEPARATOR))
    }
}

/// Read a nullable column, using the type's default for `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// An entry of an itinerary as exchanged with the frontend and backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ItineraryItem {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    /// True when the entry is only travel between two places
    #[serde(default)]
    pub transport: bool,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub description: String,
    /// Cost in GBP, 0 when free
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub theme: String,
    /// Tube, Walking, Bus, Taxi, Train, Ferry or N/A
    #[serde(rename = "transportMode", default)]
    pub transport_mode: Option<String>,
    #[serde(default)]
    pub requires_booking: bool,
    #[serde(default)]
    pub booking_url: Option<String>,
    #[serde(default)]
    pub weather: Option<String>,
    /// Celsius
    #[serde(default)]
    pub temperature: Option<i32>,
    #[serde(default)]
    pub image_link: Vec<String>,
    /// Minutes
    #[serde(default)]
    pub duration: i32,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Row of the `activities` table.
///
/// `id` is generated by storage; it is left out of inserts so every
/// inserted row gets a fresh one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub theme: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transport: bool,
    pub transport_mode: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub requires_booking: bool,
    pub booking_url: Option<String>,
    pub weather: Option<String>,
    pub temperature: Option<i32>,
    /// Comma-joined image URLs
    pub image_link: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl ActivityRow {
    /// Prepare the row for insertion under `trip_id`.
    pub fn for_insert(mut self, trip_id: i64) -> Self {
        self.id = None;
        self.trip_id = Some(trip_id);
        self
    }
}

impl From<&ActivityRow> for ItineraryItem {
    fn from(row: &ActivityRow) -> Self {
        Self {
            title: row.title.clone(),
            transport: row.transport,
            start: row.start.clone(),
            end: row.end.clone(),
            description: row.description.clone(),
            price: row.price,
            theme: row.theme.clone(),
            transport_mode: row.transport_mode.clone(),
            requires_booking: row.requires_booking,
            booking_url: row.booking_url.clone(),
            weather: row.weather.clone(),
            temperature: row.temperature,
            image_link: split_list(row.image_link.as_deref()),
            duration: row.duration,
            id: row.id.unwrap_or_default(),
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

impl From<&ItineraryItem> for ActivityRow {
    fn from(item: &ItineraryItem) -> Self {
        Self {
            id: Some(item.id),
            trip_id: None,
            title: item.title.clone(),
            start: item.start.clone(),
            end: item.end.clone(),
            description: item.description.clone(),
            price: item.price,
            theme: item.theme.clone(),
            transport: item.transport,
            transport_mode: item.transport_mode.clone(),
            requires_booking: item.requires_booking,
            booking_url: item.booking_url.clone(),
            weather: item.weather.clone(),
            temperature: item.temperature,
            image_link: join_list(&item.image_link),
            duration: item.duration,
            latitude: item.latitude,
            longitude: item.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_row(image_link: Option<&str>) -> ActivityRow {
        ActivityRow {
            id: Some(7),
            trip_id: Some(3),
            title: "Museum Visit".to_string(),
            start: "10:00 AM".to_string(),
            end: "12:00 PM".to_string(),
            description: "Visit to the Polish Museum".to_string(),
            price: 12.5,
            theme: "Culture".to_string(),
            transport: false,
            transport_mode: Some("Walking".to_string()),
            requires_booking: true,
            booking_url: Some("https://example.com/book".to_string()),
            weather: Some("Sunny".to_string()),
            temperature: Some(21),
            image_link: image_link.map(str::to_string),
            duration: 120,
            latitude: Some(52.2297),
            longitude: Some(21.0122),
        }
    }

    #[test]
    fn test_row_to_item_splits_images() {
        let row = stored_row(Some("https://a.example/1.jpg,https://a.example/2.jpg"));
        let item = ItineraryItem::from(&row);

        assert_eq!(
            item.image_link,
            vec!["https://a.example/1.jpg", "https://a.example/2.jpg"]
        );
        assert_eq!(item.id, 7);
        assert_eq!(item.transport_mode.as_deref(), Some("Walking"));
    }

    #[test]
    fn test_image_link_survives_round_trip() {
        for images in [
            Some("https://a.example/1.jpg"),
            Some("https://a.example/1.jpg,https://a.example/2.jpg,https://a.example/3.jpg"),
            None,
        ] {
            let row = stored_row(images);
            let back = ActivityRow::from(&ItineraryItem::from(&row));
            assert_eq!(back.image_link, row.image_link);
        }
    }

    #[test]
    fn test_empty_image_column_becomes_absent() {
        let row = stored_row(Some(""));
        let item = ItineraryItem::from(&row);
        assert!(item.image_link.is_empty());
        assert_eq!(ActivityRow::from(&item).image_link, None);
    }

    #[test]
    fn test_null_columns_read_as_defaults() {
        let row: ActivityRow = serde_json::from_value(serde_json::json!({
            "id": 4,
            "trip_id": 2,
            "title": "Walk",
            "start": "09:00",
            "end": "10:00",
            "transport": null,
            "description": null,
            "theme": null,
            "price": null,
            "requires_booking": null,
            "duration": null
        }))
        .unwrap();

        assert!(!row.transport);
        assert!(!row.requires_booking);
        assert_eq!(row.description, "");
        assert_eq!(row.theme, "");
        assert_eq!(row.price, 0.0);
        assert_eq!(row.duration, 0);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let row: ActivityRow = serde_json::from_value(serde_json::json!({
            "id": 1,
            "trip_id": 2,
            "title": "Walk",
            "start": "09:00",
            "end": "10:00"
        }))
        .unwrap();
        let item = ItineraryItem::from(&row);

        assert!(item.booking_url.is_none());
        assert!(item.weather.is_none());
        assert!(item.latitude.is_none());
        assert!(item.image_link.is_empty());
        assert_eq!(item.duration, 0);
    }

    #[test]
    fn test_for_insert_drops_storage_id() {
        let row = stored_row(None).for_insert(42);
        assert_eq!(row.id, None);
        assert_eq!(row.trip_id, Some(42));

        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_item_uses_frontend_field_names() {
        let item = ItineraryItem::from(&stored_row(None));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["transportMode"], "Walking");
        assert!(json.get("transport_mode").is_none());
    }
}
