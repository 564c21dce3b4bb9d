//! Error types for the `tripview` renderer

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TripViewError {
    /// Settings that fail validation, or an HTTP client that cannot be built
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Trip document could not be fetched or parsed
    #[error("Load error: {message}")]
    Load { message: String },

    /// A single geocoding lookup failed; callers fall back per activity
    #[error("Geocoding error: {message}")]
    Geocoding { message: String },

    /// The rendered page could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TripViewError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn load<S: Into<String>>(message: S) -> Self {
        Self::Load {
            message: message.into(),
        }
    }

    pub fn geocoding<S: Into<String>>(message: S) -> Self {
        Self::Geocoding {
            message: message.into(),
        }
    }

    pub fn output(path: &Path, source: std::io::Error) -> Self {
        Self::Output {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Message for the terminal, without internal detail
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripViewError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file.")
            }
            TripViewError::Load { .. } => {
                "Error loading trip data. Please check that data.json is available.".to_string()
            }
            TripViewError::Geocoding { .. } => {
                "Unable to reach the geocoding service. Please check your internet connection."
                    .to_string()
            }
            TripViewError::Output { path, .. } => format!(
                "Could not write the page to {}. Please check file permissions.",
                path.display()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TripViewError::config("bad padding");
        assert!(matches!(config_err, TripViewError::Config { .. }));

        let load_err = TripViewError::load("missing file");
        assert!(matches!(load_err, TripViewError::Load { .. }));

        let geo_err = TripViewError::geocoding("connection refused");
        assert!(matches!(geo_err, TripViewError::Geocoding { .. }));
    }

    #[test]
    fn test_user_messages() {
        let load_err = TripViewError::load("test");
        assert!(load_err.user_message().contains("data.json"));

        let config_err = TripViewError::config("bad padding");
        assert!(config_err.user_message().contains("bad padding"));
    }

    #[test]
    fn test_output_error_names_the_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = TripViewError::output(Path::new("out/index.html"), io_err);

        assert!(err.to_string().contains("out/index.html"));
        assert!(err.user_message().contains("out/index.html"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
