//! Render pipeline entry point
//!
//! Load the trip document, then either populate the page or replace it with
//! the error view. Each call is a fresh render; nothing is kept between runs.

use crate::config::TripViewConfig;
use crate::geocoding::{CoordinateResolver, GeocodingProvider, NominatimClient, http_client};
use crate::loader::{DataSource, load_trip};
use crate::models::TripDocument;
use crate::page::{PopulateSummary, populate};
use crate::view::PageModel;
use crate::view::html::{render_document, render_error_document};
use crate::Result;
use reqwest::Client;
use tracing::{info, warn};

/// Message shown in place of the page when the document cannot be loaded
pub const LOAD_ERROR_MESSAGE: &str =
    "Error loading trip data. Please check that data.json is available.";

/// Result of one render
#[derive(Debug, Clone)]
pub enum RenderOutcome {
    Rendered {
        html: String,
        summary: PopulateSummary,
    },
    LoadFailed {
        html: String,
    },
}

impl RenderOutcome {
    #[must_use]
    pub fn html(&self) -> &str {
        match self {
            RenderOutcome::Rendered { html, .. } | RenderOutcome::LoadFailed { html } => html,
        }
    }

    #[must_use]
    pub fn is_load_failure(&self) -> bool {
        matches!(self, RenderOutcome::LoadFailed { .. })
    }
}

/// Populate a page from an already loaded document, or the error view on `None`
pub async fn render_trip<P: GeocodingProvider>(
    trip: Option<&TripDocument>,
    resolver: &CoordinateResolver<P>,
    config: &TripViewConfig,
) -> RenderOutcome {
    let Some(trip) = trip else {
        warn!("No trip data, rendering the error page");
        return RenderOutcome::LoadFailed {
            html: render_error_document(LOAD_ERROR_MESSAGE),
        };
    };

    let mut page = PageModel::default();
    let summary = populate(&mut page, trip, resolver, &config.map).await;
    RenderOutcome::Rendered {
        html: render_document(&page),
        summary,
    }
}

/// Owns the HTTP client and geocoder for the lifetime of the process
pub struct Renderer {
    config: TripViewConfig,
    http: Client,
    resolver: CoordinateResolver<NominatimClient>,
}

impl Renderer {
    pub fn new(config: TripViewConfig) -> Result<Self> {
        let http = http_client(&config.geocoding)?;

        let geocoder = NominatimClient::with_client(http.clone(), &config.geocoding.base_url);
        let resolver = CoordinateResolver::new(geocoder, config.geocoding.fallback_policy());

        Ok(Self {
            config,
            http,
            resolver,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TripViewConfig {
        &self.config
    }

    #[must_use]
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Configured trip document source
    #[must_use]
    pub fn source(&self) -> DataSource {
        DataSource::parse(&self.config.data.source)
    }

    /// Render from the configured source
    pub async fn render(&self) -> RenderOutcome {
        self.render_from(&self.source()).await
    }

    pub async fn render_from(&self, source: &DataSource) -> RenderOutcome {
        info!("Rendering itinerary from {}", source);
        let trip = load_trip(source, &self.http).await;
        render_trip(trip.as_ref(), &self.resolver, &self.config).await
    }
}
