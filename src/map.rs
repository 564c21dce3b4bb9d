//! Map rendering
//!
//! Drives a [`MapSurface`] (the interactive map library) from resolved
//! activity coordinates: initial view, tile layer, one marker per resolved
//! stop with an optional numbered badge, and a final fit to all markers.

use crate::config::MapConfig;
use crate::format::format_time;
use crate::models::{Activity, Bounds, Coordinate};
use tracing::{debug, info, warn};

/// Offset in degrees between a marker and its numbered badge
pub const BADGE_OFFSET: f64 = 0.0005;

/// Operations the page's map library has to support
pub trait MapSurface {
    fn init_view(&mut self, center: Coordinate, zoom: u8);
    fn add_tile_layer(&mut self, url_template: &str, attribution: &str);
    fn add_marker(&mut self, marker: Marker);
    fn add_badge(&mut self, position: Coordinate, number: usize);
    fn fit_bounds(&mut self, bounds: Bounds);
}

/// Marker with its popup content, already formatted for display
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    pub popup: Popup,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub time: String,
    pub description: String,
}

/// One activity as seen by the map, in timeline order
#[derive(Debug, Clone, Copy)]
pub struct MapStop<'a> {
    /// 1-based position in the timeline
    pub number: usize,
    pub activity: &'a Activity,
    pub coordinate: Option<Coordinate>,
}

/// Place every resolved stop on the surface. Returns the number of markers.
pub fn render_map<S: MapSurface>(surface: &mut S, stops: &[MapStop<'_>], config: &MapConfig) -> usize {
    let (center, zoom) = match stops.iter().find_map(|stop| stop.coordinate) {
        Some(first) => (first, config.detail_zoom),
        None => {
            debug!("No resolved coordinates, using the default map view");
            (
                Coordinate::new(config.default_latitude, config.default_longitude),
                config.default_zoom,
            )
        }
    };

    surface.init_view(center, zoom);
    surface.add_tile_layer(&config.tile_url, &config.attribution);

    let mut placed = Vec::with_capacity(stops.len());
    for stop in stops {
        let Some(position) = stop.coordinate else {
            warn!(
                "Skipping map marker for '{}': no coordinate resolved",
                stop.activity.title
            );
            continue;
        };

        surface.add_marker(Marker {
            position,
            popup: Popup {
                title: stop.activity.title.clone(),
                time: format_time(&stop.activity.time),
                description: stop.activity.description.clone(),
            },
        });

        if config.number_badges {
            surface.add_badge(position.offset(BADGE_OFFSET), stop.number);
        }
        placed.push(position);
    }

    if let Some(bounds) = Bounds::from_points(&placed) {
        surface.fit_bounds(bounds.pad(config.fit_padding));
    }

    info!("Placed {} of {} map markers", placed.len(), stops.len());
    placed.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{MapCall, PageModel};

    fn activity(title: &str) -> Activity {
        Activity {
            time: "14:00".into(),
            title: title.into(),
            description: format!("{title} description"),
            address: String::new(),
            day: None,
            coordinate: None,
        }
    }

    #[test]
    fn test_zero_markers_keeps_default_view() {
        let config = MapConfig::default();
        let a = activity("Lost");
        let stops = [MapStop {
            number: 1,
            activity: &a,
            coordinate: None,
        }];
        let mut view = PageModel::default();

        let placed = render_map(&mut view, &stops, &config);

        assert_eq!(placed, 0);
        assert_eq!(
            view.map_calls[0],
            MapCall::InitView(Coordinate::new(0.0, 0.0), config.default_zoom)
        );
        assert!(view.markers().is_empty());
        assert!(!view.map_calls.iter().any(|c| matches!(c, MapCall::FitBounds(_))));
    }

    #[test]
    fn test_centres_on_first_resolved_and_fits_bounds() {
        let config = MapConfig::default();
        let (a, b, c) = (activity("A"), activity("B"), activity("C"));
        let stops = [
            MapStop { number: 1, activity: &a, coordinate: None },
            MapStop { number: 2, activity: &b, coordinate: Some(Coordinate::new(11.0, 121.9)) },
            MapStop { number: 3, activity: &c, coordinate: Some(Coordinate::new(12.0, 122.9)) },
        ];
        let mut view = PageModel::default();

        let placed = render_map(&mut view, &stops, &config);

        assert_eq!(placed, 2);
        assert_eq!(
            view.map_calls[0],
            MapCall::InitView(Coordinate::new(11.0, 121.9), config.detail_zoom)
        );
        let markers = view.markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].popup.title, "B");
        assert_eq!(markers[0].popup.time, "2:00 PM");

        let expected = Bounds::from_points(&[
            Coordinate::new(11.0, 121.9),
            Coordinate::new(12.0, 122.9),
        ])
        .unwrap()
        .pad(0.1);
        assert_eq!(view.map_calls.last(), Some(&MapCall::FitBounds(expected)));
    }

    #[test]
    fn test_badges_follow_timeline_numbers() {
        let config = MapConfig::default();
        let (a, b) = (activity("A"), activity("B"));
        let stops = [
            MapStop { number: 1, activity: &a, coordinate: Some(Coordinate::new(1.0, 1.0)) },
            MapStop { number: 2, activity: &b, coordinate: Some(Coordinate::new(2.0, 2.0)) },
        ];
        let mut view = PageModel::default();
        render_map(&mut view, &stops, &config);

        let badges: Vec<_> = view
            .map_calls
            .iter()
            .filter_map(|c| match c {
                MapCall::Badge(position, number) => Some((*position, *number)),
                _ => None,
            })
            .collect();
        assert_eq!(
            badges,
            vec![
                (Coordinate::new(1.0, 1.0).offset(BADGE_OFFSET), 1),
                (Coordinate::new(2.0, 2.0).offset(BADGE_OFFSET), 2)
            ]
        );
    }

    #[test]
    fn test_badges_can_be_disabled() {
        let config = MapConfig {
            number_badges: false,
            ..MapConfig::default()
        };
        let a = activity("A");
        let stops = [MapStop { number: 1, activity: &a, coordinate: Some(Coordinate::new(1.0, 1.0)) }];
        let mut view = PageModel::default();
        render_map(&mut view, &stops, &config);

        assert!(!view.map_calls.iter().any(|c| matches!(c, MapCall::Badge(..))));
        assert_eq!(view.markers().len(), 1);
    }
}
