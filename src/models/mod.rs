// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod directions;
pub mod itinerary;
pub mod trip;

pub use directions::{RouteSummary, TransitStep, TravelMode};
pub use itinerary::{ActivityRow, ItineraryItem};
pub use trip::{SearchConfig, TripChanges, TripResponse, TripRow};
