//! Call-to-action copy for booking offers
//!
//! Providers are recognised by a normalised identifier contained in the
//! provider name; unknown providers get the generic template.

use crate::format::capitalize_first;
use crate::models::ValidOffer;

/// Promotional card rendered in the call-to-action section
#[derive(Debug, Clone, PartialEq)]
pub struct CtaCard {
    pub provider: String,
    pub headline: String,
    pub body: String,
    pub button_label: String,
    pub url: String,
    /// First offer of the trip, emphasised on the page
    pub primary: bool,
}

struct ProviderCopy {
    key: &'static str,
    display_name: &'static str,
    headline: &'static str,
    body: &'static str,
    button_label: &'static str,
}

const PROVIDER_COPY: &[ProviderCopy] = &[
    ProviderCopy {
        key: "booking",
        display_name: "Booking.com",
        headline: "Find your stay on Booking.com",
        body: "Compare hotels and resorts along this route with free cancellation on most rooms.",
        button_label: "Check availability",
    },
    ProviderCopy {
        key: "airbnb",
        display_name: "Airbnb",
        headline: "Stay like a local with Airbnb",
        body: "Homes and unique stays close to every stop of this itinerary.",
        button_label: "Browse homes",
    },
    ProviderCopy {
        key: "agoda",
        display_name: "Agoda",
        headline: "Save on hotels with Agoda",
        body: "Member deals on accommodation across the region.",
        button_label: "See deals",
    },
    ProviderCopy {
        key: "expedia",
        display_name: "Expedia",
        headline: "Bundle and save with Expedia",
        body: "Book flights and hotels for this trip together.",
        button_label: "Plan with Expedia",
    },
    ProviderCopy {
        key: "klook",
        display_name: "Klook",
        headline: "Book the activities on Klook",
        body: "Tours, tickets and transfers for the experiences in this itinerary.",
        button_label: "Explore activities",
    },
    ProviderCopy {
        key: "tripadvisor",
        display_name: "Tripadvisor",
        headline: "Read reviews on Tripadvisor",
        body: "See what other travellers say before you book.",
        button_label: "Read reviews",
    },
];

/// Lower-case ASCII alphanumerics only, so "Booking.com" and "BOOKING" match
#[must_use]
pub fn normalize_provider(provider: &str) -> String {
    provider
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn lookup(provider: &str) -> Option<&'static ProviderCopy> {
    let normalized = normalize_provider(provider);
    PROVIDER_COPY
        .iter()
        .find(|copy| normalized.contains(copy.key))
}

/// Card for a single offer
#[must_use]
pub fn build_card(offer: &ValidOffer<'_>, primary: bool) -> CtaCard {
    match lookup(offer.provider) {
        Some(copy) => CtaCard {
            provider: copy.display_name.to_string(),
            headline: copy.headline.to_string(),
            body: copy.body.to_string(),
            button_label: copy.button_label.to_string(),
            url: offer.url.to_string(),
            primary,
        },
        None => {
            let provider = capitalize_first(offer.provider.trim());
            CtaCard {
                headline: format!("Book this trip with {provider}"),
                body: "Secure your spot for this itinerary in a few clicks.".to_string(),
                button_label: format!("Book on {provider}"),
                url: offer.url.to_string(),
                provider,
                primary,
            }
        }
    }
}

/// Cards for every offer, first one marked primary
#[must_use]
pub fn build_cards(offers: &[ValidOffer<'_>]) -> Vec<CtaCard> {
    offers
        .iter()
        .enumerate()
        .map(|(index, offer)| build_card(offer, index == 0))
        .collect()
}
