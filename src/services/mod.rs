// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - upstream clients and response shaping.

pub mod auth;
pub mod directions;
pub mod itinerary_map;
pub mod upstream;

pub use auth::AuthClient;
pub use directions::DirectionsService;
pub use itinerary_map::build_itinerary_map;
pub use upstream::{build_http_client, UpstreamClient};
