//! Data models for tripview
//!
//! This module contains the core domain models organized by concern:
//! - Trip: the itinerary document and its activities, author and offers
//! - Coordinate: latitude/longitude pairs and map bounds

pub mod coordinate;
pub mod trip;

// Re-export all public types for convenient access
pub use coordinate::{Bounds, Coordinate};
pub use trip::{Activity, Author, AuthorProfile, DayKey, Offer, TripDocument, ValidOffer};
