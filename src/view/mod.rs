//! Page view abstraction
//!
//! Renderers never touch markup directly; they write named slots and append
//! blocks through [`PageView`], and drive the map through
//! [`MapSurface`](crate::map::MapSurface). [`PageModel`] records both in
//! memory and [`html`] turns a populated model into a standalone page.

pub mod html;

use std::collections::{HashMap, HashSet};

use crate::map::{MapSurface, Marker};
use crate::models::{Bounds, Coordinate};
use crate::promo::CtaCard;

/// Named content slots of the page skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    TripTitle,
    TripDescription,
    TripDate,
    TripDuration,
    AuthorName,
    AuthorLink,
    AuthorAvatar,
    SourceLink,
    BookingLinks,
    CtaContent,
    Timeline,
    Map,
}

impl Slot {
    /// Element id in the page skeleton
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Slot::TripTitle => "trip-title",
            Slot::TripDescription => "trip-description",
            Slot::TripDate => "trip-date",
            Slot::TripDuration => "trip-duration",
            Slot::AuthorName => "author-name",
            Slot::AuthorLink => "author-link",
            Slot::AuthorAvatar => "author-avatar",
            Slot::SourceLink => "source-link",
            Slot::BookingLinks => "booking-links",
            Slot::CtaContent => "cta-content",
            Slot::Timeline => "timeline",
            Slot::Map => "map",
        }
    }
}

/// Sections hidden until the populator reveals them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Author,
    Source,
    Booking,
    CallToAction,
}

impl Section {
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Section::Author => "author-section",
            Section::Source => "source-section",
            Section::Booking => "booking-section",
            Section::CallToAction => "cta-section",
        }
    }
}

/// Timeline entry with display-ready text
#[derive(Debug, Clone, PartialEq)]
pub struct EntryBlock {
    pub time: String,
    pub title: String,
    pub description: String,
    pub address: String,
}

/// Visual block appended to a container slot
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    DayHeader { day: String, summary: String },
    Entry(EntryBlock),
    BookingLink { label: String, url: String },
    CallToAction(CtaCard),
}

/// Writes into the page's named slots
pub trait PageView {
    fn set_document_title(&mut self, title: &str);
    fn set_text(&mut self, slot: Slot, text: &str);
    fn set_link(&mut self, slot: Slot, href: &str);
    fn set_image(&mut self, slot: Slot, src: &str, alt: &str);
    fn reveal(&mut self, section: Section);
    fn clear(&mut self, slot: Slot);
    fn append(&mut self, slot: Slot, block: Block);
}

/// Map library call, in the order it was issued
#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    InitView(Coordinate, u8),
    TileLayer { url: String, attribution: String },
    Marker(Marker),
    Badge(Coordinate, usize),
    FitBounds(Bounds),
}

/// In-memory page: every slot write and map call, ready to be inspected or
/// rendered to HTML
#[derive(Debug, Clone, Default)]
pub struct PageModel {
    pub document_title: Option<String>,
    pub texts: HashMap<Slot, String>,
    pub links: HashMap<Slot, String>,
    pub images: HashMap<Slot, (String, String)>,
    pub revealed: HashSet<Section>,
    pub blocks: HashMap<Slot, Vec<Block>>,
    pub map_calls: Vec<MapCall>,
}

impl PageModel {
    #[must_use]
    pub fn text(&self, slot: Slot) -> Option<&str> {
        self.texts.get(&slot).map(String::as_str)
    }

    #[must_use]
    pub fn link(&self, slot: Slot) -> Option<&str> {
        self.links.get(&slot).map(String::as_str)
    }

    #[must_use]
    pub fn blocks(&self, slot: Slot) -> &[Block] {
        self.blocks.get(&slot).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn is_revealed(&self, section: Section) -> bool {
        self.revealed.contains(&section)
    }

    #[must_use]
    pub fn markers(&self) -> Vec<&Marker> {
        self.map_calls
            .iter()
            .filter_map(|call| match call {
                MapCall::Marker(marker) => Some(marker),
                _ => None,
            })
            .collect()
    }
}

impl PageView for PageModel {
    fn set_document_title(&mut self, title: &str) {
        self.document_title = Some(title.to_string());
    }

    fn set_text(&mut self, slot: Slot, text: &str) {
        self.texts.insert(slot, text.to_string());
    }

    fn set_link(&mut self, slot: Slot, href: &str) {
        self.links.insert(slot, href.to_string());
    }

    fn set_image(&mut self, slot: Slot, src: &str, alt: &str) {
        self.images.insert(slot, (src.to_string(), alt.to_string()));
    }

    fn reveal(&mut self, section: Section) {
        self.revealed.insert(section);
    }

    fn clear(&mut self, slot: Slot) {
        self.blocks.remove(&slot);
    }

    fn append(&mut self, slot: Slot, block: Block) {
        self.blocks.entry(slot).or_default().push(block);
    }
}

impl MapSurface for PageModel {
    fn init_view(&mut self, center: Coordinate, zoom: u8) {
        self.map_calls.push(MapCall::InitView(center, zoom));
    }

    fn add_tile_layer(&mut self, url_template: &str, attribution: &str) {
        self.map_calls.push(MapCall::TileLayer {
            url: url_template.to_string(),
            attribution: attribution.to_string(),
        });
    }

    fn add_marker(&mut self, marker: Marker) {
        self.map_calls.push(MapCall::Marker(marker));
    }

    fn add_badge(&mut self, position: Coordinate, number: usize) {
        self.map_calls.push(MapCall::Badge(position, number));
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.map_calls.push(MapCall::FitBounds(bounds));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_removes_previous_blocks() {
        let mut page = PageModel::default();
        page.append(
            Slot::Timeline,
            Block::DayHeader {
                day: "1".into(),
                summary: "1 activity".into(),
            },
        );
        assert_eq!(page.blocks(Slot::Timeline).len(), 1);

        page.clear(Slot::Timeline);
        assert!(page.blocks(Slot::Timeline).is_empty());
    }

    #[test]
    fn test_slot_ids_match_page_skeleton() {
        assert_eq!(Slot::TripTitle.id(), "trip-title");
        assert_eq!(Slot::Timeline.id(), "timeline");
        assert_eq!(Section::CallToAction.id(), "cta-section");
    }
}
