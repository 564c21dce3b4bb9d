//! Trip document model as read from `data.json`

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::Coordinate;

/// The whole itinerary, loaded once per render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripDocument {
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    /// Calendar date of the first day, `YYYY-MM-DD`
    pub date: String,
    /// Length of the trip in days
    pub duration: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub author: Option<Author>,
    #[serde(default, deserialize_with = "lenient")]
    pub source_url: Option<String>,
    /// Booking provider offers; entries that are not offers are dropped
    #[serde(default, deserialize_with = "lenient_list")]
    pub ota: Vec<Offer>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub entries: Vec<Activity>,
}

impl TripDocument {
    /// Offers that carry both a provider and a URL, in document order
    pub fn valid_offers(&self) -> impl Iterator<Item = ValidOffer<'_>> {
        self.ota.iter().filter_map(Offer::validated)
    }

    /// Source link, if one is set and not blank
    #[must_use]
    pub fn source_link(&self) -> Option<&str> {
        non_blank(self.source_url.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: Option<String>,
    /// Profile link
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Author fields that are safe to render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuthorProfile<'a> {
    pub name: &'a str,
    pub url: &'a str,
    pub avatar: Option<&'a str>,
}

impl Author {
    /// Name and link are both required; the avatar stays optional.
    #[must_use]
    pub fn profile(&self) -> Option<AuthorProfile<'_>> {
        Some(AuthorProfile {
            name: non_blank(self.name.as_deref())?,
            url: non_blank(self.url.as_deref())?,
            avatar: non_blank(self.avatar.as_deref()),
        })
    }
}

/// Booking offer from an online travel agency
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Offer {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidOffer<'a> {
    pub provider: &'a str,
    pub url: &'a str,
}

impl Offer {
    #[must_use]
    pub fn validated(&self) -> Option<ValidOffer<'_>> {
        Some(ValidOffer {
            provider: non_blank(self.provider.as_deref())?,
            url: non_blank(self.url.as_deref())?,
        })
    }
}

/// One itinerary item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Activity {
    /// Time of day, `HH:MM`
    #[serde(default, deserialize_with = "lenient")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient")]
    pub day: Option<DayKey>,
    /// Kept raw so a malformed value never fails the whole document
    #[serde(default)]
    pub coordinate: Option<serde_json::Value>,
}

impl Activity {
    /// Day this activity belongs to, day 1 when absent
    #[must_use]
    pub fn day(&self) -> DayKey {
        self.day.clone().unwrap_or_default()
    }

    /// Coordinate carried by the document itself
    #[must_use]
    pub fn embedded_coordinate(&self) -> Option<Coordinate> {
        self.coordinate.as_ref().and_then(Coordinate::from_json_pair)
    }
}

/// Day label from the document; `"2"` and `2` are the same day
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawDay", into = "String")]
pub struct DayKey {
    label: String,
    number: Option<u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDay {
    Number(u32),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl From<RawDay> for DayKey {
    fn from(raw: RawDay) -> Self {
        match raw {
            RawDay::Number(number) => DayKey::from_number(number),
            // 2.0 is day 2; anything else is not a day number
            RawDay::Float(value)
                if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) =>
            {
                DayKey::from_number(value as u32)
            }
            RawDay::Float(value) => DayKey::new(&value.to_string()),
            RawDay::Text(text) => DayKey::new(&text),
            RawDay::Other(_) => DayKey::default(),
        }
    }
}

impl From<DayKey> for String {
    fn from(day: DayKey) -> Self {
        day.label
    }
}

impl DayKey {
    /// Numeric labels are normalised (`"01"` is day 1); a blank label is day 1.
    pub fn new(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() {
            return Self::default();
        }
        match label.parse::<u32>() {
            Ok(number) => Self::from_number(number),
            Err(_) => Self {
                label: label.to_string(),
                number: None,
            },
        }
    }

    #[must_use]
    pub fn from_number(number: u32) -> Self {
        Self {
            label: number.to_string(),
            number: Some(number),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn number(&self) -> Option<u32> {
        self.number
    }
}

impl Default for DayKey {
    fn default() -> Self {
        Self::from_number(1)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

// Numeric days ascending, then non-numeric labels alphabetically.
impl Ord for DayKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.number, other.number) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.label.cmp(&other.label),
        }
    }
}

impl PartialOrd for DayKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Optional field that falls back to its default on `null` or a value of the
/// wrong shape instead of failing the whole document
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Like [`lenient`], but keeps the well-formed items of a list
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
