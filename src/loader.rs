//! Trip document loading
//!
//! One fetch, one parse. Callers get `None` on any failure and are expected to
//! swap the page for the error view.

use crate::models::TripDocument;
use crate::{Result, TripViewError};
use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument};

/// Where the trip document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` sources are fetched, anything else is a path
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            DataSource::Url(source.to_string())
        } else {
            DataSource::File(PathBuf::from(source))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

/// Load the trip document, logging and swallowing every failure
pub async fn load_trip(source: &DataSource, client: &Client) -> Option<TripDocument> {
    match try_load_trip(source, client).await {
        Ok(trip) => Some(trip),
        Err(e) => {
            error!("Error loading trip data from {}: {}", source, e);
            None
        }
    }
}

/// Fetch and parse the trip document
#[instrument(skip_all, fields(source = %source))]
pub async fn try_load_trip(source: &DataSource, client: &Client) -> Result<TripDocument> {
    let body = read_source(source, client).await?;
    let trip = parse_trip(&body)?;
    info!(
        "Loaded trip '{}' with {} entries",
        trip.title,
        trip.entries.len()
    );
    Ok(trip)
}

/// Raw trip document text, exactly as stored
pub async fn read_source(source: &DataSource, client: &Client) -> Result<String> {
    let body = match source {
        DataSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
            TripViewError::load(format!("Failed to read {}: {e}", path.display()))
        })?,
        DataSource::Url(url) => fetch(client, url).await?,
    };
    debug!("Read {} bytes of trip data", body.len());
    Ok(body)
}

/// Parse a trip document from JSON text
pub fn parse_trip(body: &str) -> Result<TripDocument> {
    serde_json::from_str(body)
        .map_err(|e| TripViewError::load(format!("Invalid trip document: {e}")))
}

async fn fetch(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| TripViewError::load(format!("Request to {url} failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(TripViewError::load(format!(
            "Request to {url} failed with status: {status}"
        )));
    }

    response
        .text()
        .await
        .map_err(|e| TripViewError::load(format!("Failed to read response body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "title": "Boracay Trip",
        "description": "Island weekend",
        "date": "2024-03-15",
        "duration": 2,
        "entries": [
            {"day": "1", "time": "09:00", "title": "Beach", "description": "Swim",
             "address": "X", "coordinate": [11.0, 121.9]}
        ]
    }"#;

    #[test]
    fn test_data_source_parse() {
        assert_eq!(
            DataSource::parse("https://example.com/data.json"),
            DataSource::Url("https://example.com/data.json".into())
        );
        assert_eq!(
            DataSource::parse("./data.json"),
            DataSource::File(PathBuf::from("./data.json"))
        );
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let source = DataSource::File(file.path().to_path_buf());
        let trip = load_trip(&source, &Client::new()).await.unwrap();
        assert_eq!(trip.title, "Boracay Trip");
        assert_eq!(trip.entries.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_no_data() {
        let source = DataSource::File(PathBuf::from("/definitely/not/here/data.json"));
        assert!(load_trip(&source, &Client::new()).await.is_none());

        let err = try_load_trip(&source, &Client::new()).await.unwrap_err();
        assert!(matches!(err, TripViewError::Load { .. }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_no_data() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{\"title\": \"half").unwrap();

        let source = DataSource::File(file.path().to_path_buf());
        assert!(load_trip(&source, &Client::new()).await.is_none());
    }

    #[test]
    fn test_null_optional_fields_still_load() {
        let body = r#"{
            "title": "Boracay Trip", "description": null, "date": "2024-03-15",
            "duration": 2, "ota": null,
            "entries": [{"day": 2.0, "time": "09:00", "title": "Beach",
                         "description": null, "address": "X"}]
        }"#;

        let trip = parse_trip(body).unwrap();
        assert!(trip.ota.is_empty());
        assert_eq!(trip.entries[0].description, "");
        assert_eq!(trip.entries[0].day().number(), Some(2));
    }

    #[test]
    fn test_parse_trip_requires_core_fields() {
        assert!(parse_trip(r#"{"title": "No date"}"#).is_err());
        assert!(parse_trip(SAMPLE).is_ok());
    }
}
