//! Page population
//!
//! Fills the page skeleton from a [`TripDocument`]: header, optional author,
//! source and booking sections, call to action, then the timeline and the map.

use crate::config::MapConfig;
use crate::format::{capitalize_first, format_date, format_duration};
use crate::geocoding::{CoordinateResolver, GeocodingProvider};
use crate::map::{MapStop, MapSurface, render_map};
use crate::models::{TripDocument, ValidOffer};
use crate::promo::build_cards;
use crate::timeline::{group_by_day, render_timeline};
use crate::view::{Block, PageView, Section, Slot};
use tracing::{debug, info, instrument};

/// What ended up on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulateSummary {
    pub days: usize,
    pub activities: usize,
    pub markers: usize,
}

/// Populate every section of the page, finishing with the map
#[instrument(skip_all, fields(title = %trip.title))]
pub async fn populate<V, P>(
    view: &mut V,
    trip: &TripDocument,
    resolver: &CoordinateResolver<P>,
    map_config: &MapConfig,
) -> PopulateSummary
where
    V: PageView + MapSurface,
    P: GeocodingProvider,
{
    populate_header(view, trip);
    populate_author(view, trip);
    populate_source(view, trip);

    let offers: Vec<ValidOffer<'_>> = trip.valid_offers().collect();
    populate_booking(view, &offers);
    populate_call_to_action(view, &offers);

    let groups = group_by_day(&trip.entries);
    render_timeline(view, &groups);

    let ordered: Vec<_> = groups
        .iter()
        .flat_map(|group| group.activities.iter().copied())
        .collect();
    let coordinates = resolver.resolve_all(ordered.iter().copied()).await;
    let stops: Vec<MapStop<'_>> = ordered
        .iter()
        .copied()
        .zip(coordinates)
        .enumerate()
        .map(|(index, (activity, coordinate))| MapStop {
            number: index + 1,
            activity,
            coordinate,
        })
        .collect();
    let markers = render_map(view, &stops, map_config);

    let summary = PopulateSummary {
        days: groups.len(),
        activities: trip.entries.len(),
        markers,
    };
    info!(
        "Populated page: {} day(s), {} activities, {} markers",
        summary.days, summary.activities, summary.markers
    );
    summary
}

fn populate_header<V: PageView>(view: &mut V, trip: &TripDocument) {
    view.set_document_title(&trip.title);
    view.set_text(Slot::TripTitle, &trip.title);
    view.set_text(Slot::TripDescription, &trip.description);
    view.set_text(Slot::TripDate, &format_date(&trip.date));
    view.set_text(Slot::TripDuration, &format_duration(trip.duration));
}

fn populate_author<V: PageView>(view: &mut V, trip: &TripDocument) {
    let Some(profile) = trip.author.as_ref().and_then(|author| author.profile()) else {
        debug!("No complete author profile, author section stays hidden");
        return;
    };

    view.set_text(Slot::AuthorName, profile.name);
    view.set_link(Slot::AuthorLink, profile.url);
    if let Some(avatar) = profile.avatar {
        view.set_image(Slot::AuthorAvatar, avatar, profile.name);
    }
    view.reveal(Section::Author);
}

fn populate_source<V: PageView>(view: &mut V, trip: &TripDocument) {
    if let Some(url) = trip.source_link() {
        view.set_link(Slot::SourceLink, url);
        view.reveal(Section::Source);
    }
}

fn populate_booking<V: PageView>(view: &mut V, offers: &[ValidOffer<'_>]) {
    if offers.is_empty() {
        debug!("No well-formed booking offers");
        return;
    }

    view.clear(Slot::BookingLinks);
    for offer in offers {
        view.append(
            Slot::BookingLinks,
            Block::BookingLink {
                label: format!("Book on {}", capitalize_first(offer.provider)),
                url: offer.url.to_string(),
            },
        );
    }
    view.reveal(Section::Booking);
}

fn populate_call_to_action<V: PageView>(view: &mut V, offers: &[ValidOffer<'_>]) {
    if offers.is_empty() {
        return;
    }

    view.clear(Slot::CtaContent);
    for card in build_cards(offers) {
        view.append(Slot::CtaContent, Block::CallToAction(card));
    }
    view.reveal(Section::CallToAction);
}
