//! Coordinate resolution for itinerary activities
//!
//! An activity either carries its own `[lat, lon]` pair or is geocoded by
//! address through a Nominatim compatible search endpoint. Failed lookups are
//! never retried; the configured [`FallbackPolicy`] decides what the map gets.

use crate::config::GeocodingConfig;
use crate::models::{Activity, Coordinate};
use crate::{Result, TripViewError};
use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// A service that turns a free-text address into its best matching coordinate
#[allow(async_fn_in_trait)]
pub trait GeocodingProvider {
    /// `Ok(None)` means the service answered but found nothing.
    async fn search(&self, query: &str) -> Result<Option<Coordinate>>;
}

/// What an unresolvable activity maps to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FallbackPolicy {
    /// No coordinate; the marker is skipped
    Skip,
    /// Legacy behaviour: pretend the activity is at a fixed place
    Fixed(Coordinate),
}

impl FallbackPolicy {
    fn apply(&self) -> Option<Coordinate> {
        match self {
            FallbackPolicy::Skip => None,
            FallbackPolicy::Fixed(coordinate) => Some(*coordinate),
        }
    }
}

/// One match from the Nominatim search endpoint
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Client for the OpenStreetMap Nominatim search API
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

/// HTTP client carrying the configured timeout and user agent, shared by the
/// document loader and the geocoder
pub fn http_client(config: &GeocodingConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds.into()))
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| TripViewError::config(format!("Failed to create HTTP client: {e}")))
}

impl NominatimClient {
    /// Reuse an existing HTTP client
    #[must_use]
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Search URL for a single top match
    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?format=json&q={}&limit=1",
            self.base_url,
            urlencoding::encode(query)
        )
    }
}

impl GeocodingProvider for NominatimClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Option<Coordinate>> {
        let url = self.search_url(query);
        debug!("Nominatim request URL: {}", url);
        let start_time = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TripViewError::geocoding(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TripViewError::geocoding(format!(
                "Geocoding request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| TripViewError::geocoding(format!("Invalid geocoding response: {e}")))?;

        debug!(
            "Geocoding answered in {:.3}s with {} result(s)",
            start_time.elapsed().as_secs_f64(),
            places.len()
        );

        places.into_iter().next().map(parse_place).transpose()
    }
}

fn parse_place(place: NominatimPlace) -> Result<Coordinate> {
    let latitude = place
        .lat
        .trim()
        .parse::<f64>()
        .map_err(|e| TripViewError::geocoding(format!("Invalid latitude '{}': {e}", place.lat)))?;
    let longitude = place
        .lon
        .trim()
        .parse::<f64>()
        .map_err(|e| TripViewError::geocoding(format!("Invalid longitude '{}': {e}", place.lon)))?;

    if let Some(name) = &place.display_name {
        debug!("Top match: {} ({:.4}, {:.4})", name, latitude, longitude);
    }
    Ok(Coordinate::new(latitude, longitude))
}

/// Resolves activities to coordinates using a provider and a fallback policy
pub struct CoordinateResolver<P> {
    provider: P,
    fallback: FallbackPolicy,
}

impl<P: GeocodingProvider> CoordinateResolver<P> {
    pub fn new(provider: P, fallback: FallbackPolicy) -> Self {
        Self { provider, fallback }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[must_use]
    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Coordinate for a single activity.
    ///
    /// An embedded pair wins without touching the network; otherwise the
    /// address is looked up exactly once.
    pub async fn resolve(&self, activity: &Activity) -> Option<Coordinate> {
        if let Some(coordinate) = activity.embedded_coordinate() {
            debug!(
                "Using embedded coordinate {} for '{}'",
                coordinate.format_coordinates(),
                activity.title
            );
            return Some(coordinate);
        }

        let address = activity.address.trim();
        if address.is_empty() {
            warn!("Activity '{}' has no address to geocode", activity.title);
            return self.fallback.apply();
        }

        match self.provider.search(address).await {
            Ok(Some(coordinate)) => {
                debug!(
                    "Geocoded '{}' to {}",
                    address,
                    coordinate.format_coordinates()
                );
                Some(coordinate)
            }
            Ok(None) => {
                warn!("Could not geocode address: {}", address);
                self.fallback.apply()
            }
            Err(e) => {
                error!("Geocoding error for '{}': {}", address, e);
                self.fallback.apply()
            }
        }
    }

    /// Resolve every activity in one gather; output index matches input index.
    pub async fn resolve_all<'a, I>(&self, activities: I) -> Vec<Option<Coordinate>>
    where
        I: IntoIterator<Item = &'a Activity>,
    {
        let start_time = Instant::now();
        let resolved = join_all(activities.into_iter().map(|activity| self.resolve(activity))).await;

        info!(
            "Resolved {}/{} activity coordinates in {:.3}s",
            resolved.iter().filter(|c| c.is_some()).count(),
            resolved.len(),
            start_time.elapsed().as_secs_f64()
        );
        resolved
    }
}
