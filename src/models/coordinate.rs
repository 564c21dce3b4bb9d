//! Coordinate model and map bounds

use serde::{Deserialize, Serialize};

/// Latitude/longitude pair used to place a marker
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Interpret a raw JSON value as `[lat, lon]`.
    ///
    /// Only a two-element array of numbers qualifies; anything else is `None`.
    #[must_use]
    pub fn from_json_pair(value: &serde_json::Value) -> Option<Self> {
        match value.as_array()?.as_slice() {
            [lat, lon] => Some(Self::new(lat.as_f64()?, lon.as_f64()?)),
            _ => None,
        }
    }

    /// Same coordinate shifted by `delta` degrees on both axes
    #[must_use]
    pub fn offset(&self, delta: f64) -> Self {
        Self::new(self.latitude + delta, self.longitude + delta)
    }

    /// Format as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Axis-aligned bounding box over a set of coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    /// Smallest box containing every point, `None` for an empty set
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self {
            south_west: first,
            north_east: first,
        };
        for point in iter {
            bounds.extend(point);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, point: &Coordinate) {
        self.south_west.latitude = self.south_west.latitude.min(point.latitude);
        self.south_west.longitude = self.south_west.longitude.min(point.longitude);
        self.north_east.latitude = self.north_east.latitude.max(point.latitude);
        self.north_east.longitude = self.north_east.longitude.max(point.longitude);
    }

    /// Grow each side by `ratio` times the span on that axis
    #[must_use]
    pub fn pad(&self, ratio: f64) -> Self {
        let lat_buffer = (self.north_east.latitude - self.south_west.latitude).abs() * ratio;
        let lon_buffer = (self.north_east.longitude - self.south_west.longitude).abs() * ratio;
        Self {
            south_west: Coordinate::new(
                self.south_west.latitude - lat_buffer,
                self.south_west.longitude - lon_buffer,
            ),
            north_east: Coordinate::new(
                self.north_east.latitude + lat_buffer,
                self.north_east.longitude + lon_buffer,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_pair_accepts_numeric_pair() {
        let coordinate = Coordinate::from_json_pair(&json!([11.0, 121.9])).unwrap();
        assert_eq!(coordinate, Coordinate::new(11.0, 121.9));

        let integers = Coordinate::from_json_pair(&json!([11, 122])).unwrap();
        assert_eq!(integers, Coordinate::new(11.0, 122.0));
    }

    #[test]
    fn test_from_json_pair_rejects_other_shapes() {
        assert!(Coordinate::from_json_pair(&json!([11.0])).is_none());
        assert!(Coordinate::from_json_pair(&json!([11.0, 121.9, 3.0])).is_none());
        assert!(Coordinate::from_json_pair(&json!(["11.0", "121.9"])).is_none());
        assert!(Coordinate::from_json_pair(&json!({"lat": 11.0, "lon": 121.9})).is_none());
        assert!(Coordinate::from_json_pair(&json!(null)).is_none());
    }

    #[test]
    fn test_bounds_and_padding() {
        let points = [
            Coordinate::new(10.0, 120.0),
            Coordinate::new(12.0, 124.0),
            Coordinate::new(11.0, 121.0),
        ];
        let bounds = Bounds::from_points(&points).unwrap();
        assert_eq!(bounds.south_west, Coordinate::new(10.0, 120.0));
        assert_eq!(bounds.north_east, Coordinate::new(12.0, 124.0));

        let padded = bounds.pad(0.1);
        assert!((padded.south_west.latitude - 9.8).abs() < 1e-9);
        assert!((padded.south_west.longitude - 119.6).abs() < 1e-9);
        assert!((padded.north_east.latitude - 12.2).abs() < 1e-9);
        assert!((padded.north_east.longitude - 124.4).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_empty() {
        let points: [Coordinate; 0] = [];
        assert!(Bounds::from_points(&points).is_none());
    }
}
