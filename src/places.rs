//! Lookup tables that steer geocoding toward useful matches.
//!
//! Everything here is data: the resolver never branches on a place name.
//! [`PlaceTables::default`] carries the Sri Lanka tables; other regions (or
//! tests) can supply their own.

use serde::{Deserialize, Serialize};

const COUNTRY_CODE: &str = "lk";
const COUNTRY_NAME: &str = "Sri Lanka";

const LANDMARK_KEYWORDS: &[&str] = &[
    "bus stand", "railway", "station", "fort", "hospital", "airport", "hotel", "mall",
    "junction", "road", "street", "temple", "church", "mosque", "beach", "park", "market",
];

const BROAD_PLACES: &[&str] = &[
    "colombo", "gampaha", "kandy", "galle", "negombo", "kurunegala", "anuradhapura", "jaffna",
    "trincomalee", "batticaloa", "matara", "ratnapura", "badulla", "nuwara eliya", "kalutara",
    "hambantota",
];

// Order matters: the first matching key wins.
const ENHANCEMENTS: &[(&str, &str)] = &[
    ("bia", "Bandaranaike International Airport, Katunayake, Sri Lanka"),
    ("katunayake airport", "Bandaranaike International Airport, Katunayake, Sri Lanka"),
    ("colombo fort station", "Colombo Fort Railway Station, Sri Lanka"),
    ("fort station", "Colombo Fort Railway Station, Sri Lanka"),
    ("colombo fort", "Fort, Colombo, Sri Lanka"),
    ("galle fort", "Galle Fort, Galle, Sri Lanka"),
    ("jaffna fort", "Jaffna Fort, Jaffna, Sri Lanka"),
    ("fort", "Fort, Colombo 01, Sri Lanka"),
    ("galle face", "Galle Face, Colombo, Sri Lanka"),
    ("mount lavinia", "Mount Lavinia, Dehiwala-Mount Lavinia, Sri Lanka"),
    ("kandy city", "Kandy, Central Province, Sri Lanka"),
    ("peradeniya", "Peradeniya, Kandy, Sri Lanka"),
    ("nugegoda", "Nugegoda, Colombo, Sri Lanka"),
    ("maharagama", "Maharagama, Colombo, Sri Lanka"),
    ("gampaha bus stand", "Gampaha Bus Stand, Gampaha, Sri Lanka"),
    ("gampaha railway station", "Gampaha Railway Station, Gampaha, Sri Lanka"),
    ("gampaha station", "Gampaha Railway Station, Gampaha, Sri Lanka"),
    ("kandy bus stand", "Kandy Bus Stand, Kandy, Sri Lanka"),
    ("kandy railway station", "Kandy Railway Station, Sri Lanka"),
    ("pettah bus stand", "Pettah Bus Stand, Colombo, Sri Lanka"),
    ("negombo", "Negombo, Western Province, Sri Lanka"),
    ("galle", "Galle, Southern Province, Sri Lanka"),
    ("matara", "Matara, Southern Province, Sri Lanka"),
    ("jaffna", "Jaffna, Northern Province, Sri Lanka"),
    ("anuradhapura", "Anuradhapura, North Central Province, Sri Lanka"),
    ("polonnaruwa", "Polonnaruwa, North Central Province, Sri Lanka"),
    ("trincomalee", "Trincomalee, Eastern Province, Sri Lanka"),
    ("batticaloa", "Batticaloa, Eastern Province, Sri Lanka"),
    ("kurunegala", "Kurunegala, North Western Province, Sri Lanka"),
    ("ratnapura", "Ratnapura, Sabaragamuwa Province, Sri Lanka"),
    ("badulla", "Badulla, Uva Province, Sri Lanka"),
    ("nuwara eliya", "Nuwara Eliya, Central Province, Sri Lanka"),
    ("ella", "Ella, Badulla, Sri Lanka"),
    ("sigiriya", "Sigiriya, Matale, Sri Lanka"),
    ("dambulla", "Dambulla, Matale, Sri Lanka"),
    ("wso2", "105 Bauddhaloka Mawatha, Colombo 4, Sri Lanka"),
];

/// Enhancement keys that only apply when they are the entire query.
const WHOLE_QUERY_KEYS: &[&str] = &["fort"];

const LANDMARK_PATTERNS: &[(&str, &str)] = &[
    ("bus stand", "Bus Stand"),
    ("railway station", "Railway Station"),
];

// A venue name plus at most one other word is geocoded as its city.
const VENUE_MARKERS: &[&str] = &["hotel", "land of the kings"];

const VENUE_CITIES: &[(&str, &str)] = &[
    ("gampaha", "Gampaha, Western Province, Sri Lanka"),
    ("colombo", "Colombo, Western Province, Sri Lanka"),
    ("kandy", "Kandy, Central Province, Sri Lanka"),
];

const FALLBACKS: &[(&str, &str)] = &[
    ("wso2", "105 Bauddhaloka Mawatha, Colombo 4, Sri Lanka"),
    ("colombo 1", "Colombo 01, Fort, Sri Lanka"),
    ("colombo 2", "Colombo 02, Slave Island, Sri Lanka"),
    ("colombo 3", "Colombo 03, Kollupitiya, Sri Lanka"),
    ("colombo 4", "Colombo 04, Bambalapitiya, Sri Lanka"),
    ("colombo 5", "Colombo 05, Narahenpita, Sri Lanka"),
    ("colombo 6", "Colombo 06, Wellawatta, Sri Lanka"),
    ("colombo 7", "Colombo 07, Cinnamon Gardens, Sri Lanka"),
    ("colombo fort", "Fort, Colombo, Sri Lanka"),
    ("pettah", "Pettah, Colombo, Sri Lanka"),
    ("bambalapitiya", "Bambalapitiya, Colombo, Sri Lanka"),
    ("wellawatta", "Wellawatta, Colombo, Sri Lanka"),
    ("mount lavinia", "Mount Lavinia, Dehiwala-Mount Lavinia, Sri Lanka"),
];

const FALLBACK_CITIES: &[&str] = &[
    "colombo", "gampaha", "kandy", "galle", "negombo", "kurunegala", "anuradhapura", "jaffna",
    "matara", "ratnapura", "badulla",
];

const SUGGESTIONS: &[(&str, &[&str])] = &[
    (
        "colombo",
        &[
            "Colombo Fort (Railway Station)",
            "Pettah (Market Area)",
            "Bambalapitiya",
            "Kollupitiya",
            "Colombo 7 (Cinnamon Gardens)",
            "Dehiwala",
        ],
    ),
    (
        "gampaha",
        &[
            "Gampaha Bus Stand",
            "Gampaha Railway Station",
            "Gampaha Town Center",
            "Gampaha Hospital",
        ],
    ),
    (
        "kandy",
        &[
            "Kandy City Center",
            "Kandy Railway Station",
            "Kandy Bus Stand",
            "Temple of the Tooth",
            "Peradeniya",
        ],
    ),
    ("negombo", &["Negombo Bus Stand", "Negombo Beach", "Negombo City Center"]),
    ("galle", &["Galle Fort", "Galle Bus Stand", "Galle Railway Station"]),
];

/// A lowercase key and the fuller query it expands to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub key: String,
    pub expansion: String,
    /// Match only when the key is the whole query, not a word inside it.
    #[serde(default)]
    pub whole_query: bool,
}

/// "<place> <trigger>" becomes "<Place> <label>, <Place>, <country>".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkPattern {
    pub trigger: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceTables {
    /// Geocoder country restriction.
    pub country_code: String,
    /// Appended to queries that don't already name the country.
    pub country_name: String,
    pub landmark_keywords: Vec<String>,
    /// Bare city/district names that need a more specific pickup point.
    pub broad_places: Vec<String>,
    pub enhancements: Vec<Alias>,
    pub landmark_patterns: Vec<LandmarkPattern>,
    /// Venue words whose short queries resolve to the city they name.
    pub venue_markers: Vec<String>,
    pub venue_cities: Vec<Alias>,
    /// Tried once when the geocoder finds nothing.
    pub fallbacks: Vec<Alias>,
    pub fallback_cities: Vec<String>,
    /// Per-place disambiguation suggestions.
    pub suggestions: Vec<(String, Vec<String>)>,
}

impl Default for PlaceTables {
    fn default() -> Self {
        Self {
            country_code: COUNTRY_CODE.to_string(),
            country_name: COUNTRY_NAME.to_string(),
            landmark_keywords: strings(LANDMARK_KEYWORDS),
            broad_places: strings(BROAD_PLACES),
            enhancements: aliases(ENHANCEMENTS)
                .into_iter()
                .map(|alias| Alias {
                    whole_query: WHOLE_QUERY_KEYS.contains(&alias.key.as_str()),
                    ..alias
                })
                .collect(),
            landmark_patterns: LANDMARK_PATTERNS
                .iter()
                .map(|(trigger, label)| LandmarkPattern {
                    trigger: trigger.to_string(),
                    label: label.to_string(),
                })
                .collect(),
            venue_markers: strings(VENUE_MARKERS),
            venue_cities: aliases(VENUE_CITIES),
            fallbacks: aliases(FALLBACKS),
            fallback_cities: strings(FALLBACK_CITIES),
            suggestions: SUGGESTIONS
                .iter()
                .map(|(place, items)| (place.to_string(), strings(items)))
                .collect(),
        }
    }
}

impl PlaceTables {
    /// True for a bare city/district name with no landmark in it.
    pub fn is_broad(&self, text: &str) -> bool {
        let lower = text.trim().to_lowercase();
        if self
            .landmark_keywords
            .iter()
            .any(|keyword| lower.contains(keyword.as_str()))
        {
            return false;
        }
        self.broad_places.iter().any(|place| *place == lower)
    }

    /// Rewrites `text` into a query the geocoder is more likely to match.
    pub fn enhance(&self, text: &str) -> String {
        let trimmed = text.trim();
        let lower = trimmed.to_lowercase();

        if let Some(alias) = first_alias(&self.enhancements, &lower) {
            return alias.expansion.clone();
        }

        if !trimmed.contains(", ") {
            for pattern in &self.landmark_patterns {
                if !lower.contains(pattern.trigger.as_str()) {
                    continue;
                }
                let place = lower.replace(pattern.trigger.as_str(), "");
                let place = place.trim();
                if !place.is_empty() {
                    let place = title_case(place);
                    return format!(
                        "{place} {label}, {place}, {country}",
                        label = pattern.label,
                        country = self.country_name
                    );
                }
            }
        }

        if let Some(city) = self.venue_city(&lower) {
            return city.expansion.clone();
        }

        if lower.contains(&self.country_name.to_lowercase()) {
            trimmed.to_string()
        } else {
            format!("{trimmed}, {}", self.country_name)
        }
    }

    /// A fuller address to retry with, if any key or known city appears in
    /// `text`.
    pub fn fallback_for(&self, text: &str) -> Option<String> {
        let lower = text.trim().to_lowercase();

        if let Some(alias) = first_alias(&self.fallbacks, &lower) {
            return Some(alias.expansion.clone());
        }

        self.fallback_cities
            .iter()
            .find(|city| contains_words(&lower, city))
            .map(|city| format!("{}, {}", title_case(city), self.country_name))
    }

    /// Suggestions offered when a broad place matched several candidates.
    /// Never empty: places without a table entry get generic suggestions.
    pub fn alternatives_for(&self, text: &str) -> Vec<String> {
        let trimmed = text.trim();
        let lower = trimmed.to_lowercase();

        match self
            .suggestions
            .iter()
            .find(|(place, items)| *place == lower && !items.is_empty())
        {
            Some((_, items)) => items.clone(),
            None => vec![
                format!("{trimmed} Bus Stand"),
                format!("{trimmed} Railway Station"),
                format!("{trimmed} Town Center"),
            ],
        }
    }
}

impl PlaceTables {
    fn venue_city(&self, lower: &str) -> Option<&Alias> {
        let marker = self
            .venue_markers
            .iter()
            .find(|marker| contains_words(lower, marker))?;
        let rest = lower.replacen(marker.as_str(), " ", 1);
        if rest.split_whitespace().count() > 1 {
            return None;
        }
        self.venue_cities
            .iter()
            .find(|city| contains_words(lower, &city.key))
    }
}

fn first_alias<'a>(table: &'a [Alias], lower: &str) -> Option<&'a Alias> {
    table
        .iter()
        .find(|alias| {
            lower == alias.key || (!alias.whole_query && contains_words(lower, &alias.key))
        })
}

/// True when `needle` occurs in `haystack` bounded by non-alphanumerics, so
/// "ella" matches "ella rock" but not "wellawatta".
fn contains_words(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn aliases(pairs: &[(&str, &str)]) -> Vec<Alias> {
    pairs
        .iter()
        .map(|(key, expansion)| Alias {
            key: key.to_string(),
            expansion: expansion.to_string(),
            whole_query: false,
        })
        .collect()
}
