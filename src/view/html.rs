//! Standalone HTML rendering of a populated [`PageModel`]
//!
//! The map section is emitted as Leaflet calls replaying the recorded
//! [`MapCall`]s in order.

use std::fmt::Write;

use super::{Block, MapCall, PageModel, Section, Slot};
use crate::map::Marker;
use crate::promo::CtaCard;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

const STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; color: #2d3748; background: #f7fafc; }
.trip-header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 40px 20px; text-align: center; }
.trip-meta span { margin: 0 10px; }
section { max-width: 1100px; margin: 20px auto; padding: 0 20px; }
.author-section img { width: 40px; height: 40px; border-radius: 50%; vertical-align: middle; margin-right: 8px; }
.booking-link, .cta-button { display: inline-block; margin: 4px 8px 4px 0; padding: 8px 16px; border-radius: 6px; background: #667eea; color: white; text-decoration: none; }
.cta-card { border: 1px solid #e2e8f0; border-radius: 10px; padding: 16px; margin-bottom: 12px; background: white; }
.cta-card.cta-primary { border: 2px solid #764ba2; box-shadow: 0 4px 14px rgba(118, 75, 162, 0.25); }
.content { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; max-width: 1100px; margin: 0 auto; padding: 20px; }
.day-header { display: flex; justify-content: space-between; align-items: baseline; border-bottom: 2px solid #667eea; margin-top: 16px; }
.timeline-entry { background: white; border-left: 4px solid #667eea; border-radius: 6px; padding: 12px 16px; margin: 10px 0; }
.entry-time { font-weight: bold; color: #667eea; }
.entry-title { font-size: 1.1rem; font-weight: 600; }
.entry-address { font-size: 0.9rem; color: #718096; }
.map { height: 600px; border-radius: 10px; }
.marker-dot { background-color: #667eea; width: 20px; height: 20px; border-radius: 50%; border: 3px solid white; box-shadow: 0 2px 10px rgba(0,0,0,0.3); }
.number-badge { background-color: #764ba2; color: white; width: 25px; height: 25px; border-radius: 50%; display: flex; align-items: center; justify-content: center; font-weight: bold; font-size: 12px; border: 2px solid white; box-shadow: 0 2px 10px rgba(0,0,0,0.3); }
"#;

/// Render the full page for a populated model
#[must_use]
pub fn render_document(page: &PageModel) -> String {
    let mut out = String::new();
    let title = page.document_title.as_deref().unwrap_or("Trip itinerary");

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_html(title));
    let _ = writeln!(out, "<link rel=\"stylesheet\" href=\"{LEAFLET_CSS}\">");
    let _ = writeln!(out, "<style>{STYLE}</style>");
    out.push_str("</head>\n<body>\n");

    out.push_str("<header class=\"trip-header\">\n");
    let _ = writeln!(out, "<h1 id=\"{}\">{}</h1>", Slot::TripTitle.id(), slot_text(page, Slot::TripTitle));
    let _ = writeln!(
        out,
        "<p id=\"{}\">{}</p>",
        Slot::TripDescription.id(),
        slot_text(page, Slot::TripDescription)
    );
    let _ = writeln!(
        out,
        "<div class=\"trip-meta\"><span id=\"{}\">{}</span><span id=\"{}\">{}</span></div>",
        Slot::TripDate.id(),
        slot_text(page, Slot::TripDate),
        Slot::TripDuration.id(),
        slot_text(page, Slot::TripDuration)
    );
    out.push_str("</header>\n");

    render_author(&mut out, page);

    let _ = writeln!(
        out,
        "<section id=\"{}\" class=\"source-section\"{}><a id=\"{}\" href=\"{}\" target=\"_blank\" rel=\"noopener\">View original source</a></section>",
        Section::Source.id(),
        hidden_attr(page, Section::Source),
        Slot::SourceLink.id(),
        escape_html(page.link(Slot::SourceLink).unwrap_or("#"))
    );

    let _ = writeln!(
        out,
        "<section id=\"{}\" class=\"booking-section\"{}>\n<h2>Book this trip</h2>\n<div id=\"{}\">",
        Section::Booking.id(),
        hidden_attr(page, Section::Booking),
        Slot::BookingLinks.id()
    );
    render_blocks(&mut out, page.blocks(Slot::BookingLinks));
    out.push_str("</div>\n</section>\n");

    let _ = writeln!(
        out,
        "<section id=\"{}\" class=\"cta-section\"{}>\n<div id=\"{}\">",
        Section::CallToAction.id(),
        hidden_attr(page, Section::CallToAction),
        Slot::CtaContent.id()
    );
    render_blocks(&mut out, page.blocks(Slot::CtaContent));
    out.push_str("</div>\n</section>\n");

    out.push_str("<main class=\"content\">\n");
    let _ = writeln!(out, "<div id=\"{}\" class=\"timeline\">", Slot::Timeline.id());
    render_blocks(&mut out, page.blocks(Slot::Timeline));
    out.push_str("</div>\n");
    let _ = writeln!(out, "<div id=\"{}\" class=\"map\"></div>", Slot::Map.id());
    out.push_str("</main>\n");

    if !page.map_calls.is_empty() {
        let _ = writeln!(out, "<script src=\"{LEAFLET_JS}\"></script>");
        out.push_str("<script>\n");
        out.push_str(&map_script(&page.map_calls));
        out.push_str("</script>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

/// Full-page replacement shown when the trip document cannot be loaded
#[must_use]
pub fn render_error_document(message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Trip itinerary</title>\n</head>\n<body>\n<div style=\"text-align: center; padding: 50px; font-size: 1.2rem; color: #e53e3e;\">{}</div>\n</body>\n</html>\n",
        escape_html(message)
    )
}

fn render_author(out: &mut String, page: &PageModel) {
    let _ = writeln!(
        out,
        "<section id=\"{}\" class=\"author-section\"{}>",
        Section::Author.id(),
        hidden_attr(page, Section::Author)
    );
    match page.images.get(&Slot::AuthorAvatar) {
        Some((src, alt)) => {
            let _ = writeln!(
                out,
                "<img id=\"{}\" src=\"{}\" alt=\"{}\">",
                Slot::AuthorAvatar.id(),
                escape_html(src),
                escape_html(alt)
            );
        }
        None => {
            let _ = writeln!(
                out,
                "<img id=\"{}\" alt=\"\" style=\"display: none;\">",
                Slot::AuthorAvatar.id()
            );
        }
    }
    let _ = writeln!(
        out,
        "<a id=\"{}\" href=\"{}\" target=\"_blank\" rel=\"noopener\"><span id=\"{}\">{}</span></a>",
        Slot::AuthorLink.id(),
        escape_html(page.link(Slot::AuthorLink).unwrap_or("#")),
        Slot::AuthorName.id(),
        slot_text(page, Slot::AuthorName)
    );
    out.push_str("</section>\n");
}

fn render_blocks(out: &mut String, blocks: &[Block]) {
    for block in blocks {
        match block {
            Block::DayHeader { day, summary } => {
                let _ = writeln!(
                    out,
                    "<div class=\"day-header\"><h3>Day {}</h3><span class=\"day-count\">{}</span></div>",
                    escape_html(day),
                    escape_html(summary)
                );
            }
            Block::Entry(entry) => {
                let _ = writeln!(
                    out,
                    "<div class=\"timeline-entry\">\n<div class=\"entry-time\">{}</div>\n<div class=\"entry-title\">{}</div>\n<div class=\"entry-description\">{}</div>\n<div class=\"entry-address\">{}</div>\n</div>",
                    escape_html(&entry.time),
                    escape_html(&entry.title),
                    escape_html(&entry.description),
                    escape_html(&entry.address)
                );
            }
            Block::BookingLink { label, url } => {
                let _ = writeln!(
                    out,
                    "<a class=\"booking-link\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
                    escape_html(url),
                    escape_html(label)
                );
            }
            Block::CallToAction(card) => render_cta(out, card),
        }
    }
}

fn render_cta(out: &mut String, card: &CtaCard) {
    let class = if card.primary {
        "cta-card cta-primary"
    } else {
        "cta-card"
    };
    let _ = writeln!(
        out,
        "<div class=\"{class}\">\n<h3>{}</h3>\n<p>{}</p>\n<a class=\"cta-button\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>\n</div>",
        escape_html(&card.headline),
        escape_html(&card.body),
        escape_html(&card.url),
        escape_html(&card.button_label)
    );
}

fn map_script(calls: &[MapCall]) -> String {
    let mut js = String::new();
    js.push_str("const markerIcon = L.divIcon({ className: 'custom-marker', html: '<div class=\"marker-dot\"></div>', iconSize: [20, 20], iconAnchor: [10, 10] });\n");

    for call in calls {
        match call {
            MapCall::InitView(center, zoom) => {
                let _ = writeln!(
                    js,
                    "const map = L.map('{}').setView([{}, {}], {});",
                    Slot::Map.id(),
                    center.latitude,
                    center.longitude,
                    zoom
                );
            }
            MapCall::TileLayer { url, attribution } => {
                let _ = writeln!(
                    js,
                    "L.tileLayer({}, {{ attribution: {} }}).addTo(map);",
                    js_string(url),
                    js_string(attribution)
                );
            }
            MapCall::Marker(marker) => {
                let _ = writeln!(
                    js,
                    "L.marker([{}, {}], {{ icon: markerIcon }}).addTo(map).bindPopup({});",
                    marker.position.latitude,
                    marker.position.longitude,
                    js_string(&popup_html(marker))
                );
            }
            MapCall::Badge(position, number) => {
                let _ = writeln!(
                    js,
                    "L.marker([{}, {}], {{ icon: L.divIcon({{ className: 'number-marker', html: '<div class=\"number-badge\">{}</div>', iconSize: [25, 25], iconAnchor: [12.5, 12.5] }}) }}).addTo(map);",
                    position.latitude,
                    position.longitude,
                    number
                );
            }
            MapCall::FitBounds(bounds) => {
                let _ = writeln!(
                    js,
                    "map.fitBounds([[{}, {}], [{}, {}]]);",
                    bounds.south_west.latitude,
                    bounds.south_west.longitude,
                    bounds.north_east.latitude,
                    bounds.north_east.longitude
                );
            }
        }
    }
    js
}

fn popup_html(marker: &Marker) -> String {
    format!(
        "<div class=\"popup-content\"><div class=\"popup-title\">{}</div><div class=\"popup-time\">{}</div><div class=\"popup-description\">{}</div></div>",
        escape_html(&marker.popup.title),
        escape_html(&marker.popup.time),
        escape_html(&marker.popup.description)
    )
}

fn slot_text(page: &PageModel, slot: Slot) -> String {
    escape_html(page.text(slot).unwrap_or_default())
}

fn hidden_attr(page: &PageModel, section: Section) -> &'static str {
    if page.is_revealed(section) {
        ""
    } else {
        " style=\"display: none;\""
    }
}

/// JSON string literal that is also safe inside a `<script>` element
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
