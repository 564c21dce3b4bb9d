//! `tripview` - Travel itinerary renderer
//!
//! Loads a trip document, lays its activities out as a day-grouped timeline
//! and plots them on a map, geocoding any activity that has no coordinates.

pub mod app;
pub mod config;
pub mod error;
pub mod format;
pub mod geocoding;
pub mod loader;
pub mod logging;
pub mod map;
pub mod models;
pub mod page;
pub mod promo;
pub mod timeline;
pub mod view;
pub mod web;

// Re-export core types for public API
pub use app::{RenderOutcome, Renderer, render_trip};
pub use config::TripViewConfig;
pub use error::TripViewError;
pub use geocoding::{CoordinateResolver, FallbackPolicy, GeocodingProvider, NominatimClient};
pub use loader::DataSource;
pub use models::{Activity, Bounds, Coordinate, DayKey, TripDocument};
pub use page::{PopulateSummary, populate};
pub use view::{MapCall, PageModel, PageView};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripViewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
