//! Place resolution: free text to a routable coordinate.
//!
//! One lookup, plus at most one retry through the fallback table. Broad city
//! names that match several places come back as [`Resolution::Ambiguous`] so
//! the caller can ask the user to pick a specific pickup point.

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::places::PlaceTables;
use crate::traits::{Coordinates, GeocodeCandidate, GeocodeQuery, Geocoder};

/// Candidates requested for broad queries.
const BROAD_LIMIT: usize = 5;

/// Original text plus at most one fallback rewrite.
const MAX_ATTEMPTS: usize = 2;

const NO_MATCH_SUGGESTION: &str = "Please provide a nearby landmark, address, or well-known location (e.g., 'Colombo 4' instead of specific office names)";
const UNAVAILABLE_SUGGESTION: &str =
    "Geocoding service temporarily unavailable. Please try again or describe a nearby landmark.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Ambiguous,
    NotFound,
}

/// Why nothing usable came back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum NotFoundReason {
    NoMatch,
    ServiceUnavailable(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "confidence", rename_all = "snake_case")]
pub enum Resolution {
    #[serde(rename = "high")]
    Found {
        coordinates: Coordinates,
        display_address: String,
    },
    Ambiguous {
        alternatives: Vec<String>,
    },
    NotFound {
        reason: NotFoundReason,
        suggestion: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    /// Text as the caller supplied it.
    pub query: String,
    #[serde(flatten)]
    pub resolution: Resolution,
}

impl ResolvedLocation {
    pub fn confidence(&self) -> Confidence {
        match self.resolution {
            Resolution::Found { .. } => Confidence::High,
            Resolution::Ambiguous { .. } => Confidence::Ambiguous,
            Resolution::NotFound { .. } => Confidence::NotFound,
        }
    }

    /// Only `High` resolutions carry a routable coordinate.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self.resolution {
            Resolution::Found { coordinates, .. } => Some(coordinates),
            _ => None,
        }
    }

    pub fn display_address(&self) -> Option<&str> {
        match &self.resolution {
            Resolution::Found {
                display_address, ..
            } => Some(display_address),
            _ => None,
        }
    }

    /// Empty unless `Ambiguous`.
    pub fn alternatives(&self) -> &[String] {
        match &self.resolution {
            Resolution::Ambiguous { alternatives } => alternatives,
            _ => &[],
        }
    }
}

pub struct PlaceResolver<G> {
    geocoder: G,
    tables: PlaceTables,
}

impl<G: Geocoder> PlaceResolver<G> {
    pub fn new(geocoder: G, tables: PlaceTables) -> Self {
        Self { geocoder, tables }
    }

    pub fn tables(&self) -> &PlaceTables {
        &self.tables
    }

    /// Fails only for blank input; every other outcome is a [`Resolution`].
    pub fn resolve(&self, text: &str) -> Result<ResolvedLocation, QuoteError> {
        let original = text.trim();
        if original.is_empty() {
            return Err(QuoteError::invalid("location text is empty"));
        }

        let mut current = original.to_string();
        for attempt in 0..MAX_ATTEMPTS {
            let is_broad = self.tables.is_broad(&current);
            let enhanced = self.tables.enhance(&current);
            let query = GeocodeQuery {
                text: &enhanced,
                country_code: &self.tables.country_code,
                limit: if is_broad { BROAD_LIMIT } else { 1 },
            };

            tracing::debug!(
                location = original,
                query = %enhanced,
                attempt,
                is_broad,
                "geocoding location"
            );

            let candidates = match self.geocoder.search(&query) {
                Ok(candidates) => candidates,
                Err(err) => {
                    tracing::warn!(location = original, error = %err, "geocoding failed");
                    return Ok(self.not_found(
                        original,
                        NotFoundReason::ServiceUnavailable(err.to_string()),
                        UNAVAILABLE_SUGGESTION,
                    ));
                }
            };

            if let Some(resolution) = self.classify(&current, is_broad, candidates) {
                tracing::info!(location = original, attempt, "location resolved");
                return Ok(ResolvedLocation {
                    query: original.to_string(),
                    resolution,
                });
            }

            if attempt + 1 == MAX_ATTEMPTS {
                break;
            }
            match self.tables.fallback_for(&current) {
                Some(fallback) => {
                    tracing::info!(location = original, fallback = %fallback, "trying fallback location");
                    current = fallback;
                }
                None => break,
            }
        }

        tracing::warn!(location = original, "location not found");
        Ok(self.not_found(original, NotFoundReason::NoMatch, NO_MATCH_SUGGESTION))
    }

    /// `None` when there were no candidates at all.
    fn classify(
        &self,
        text: &str,
        is_broad: bool,
        candidates: Vec<GeocodeCandidate>,
    ) -> Option<Resolution> {
        if is_broad && candidates.len() >= 2 {
            return Some(Resolution::Ambiguous {
                alternatives: self.tables.alternatives_for(text),
            });
        }

        let first = candidates.into_iter().next()?;
        match Coordinates::new(first.latitude, first.longitude) {
            Ok(coordinates) => Some(Resolution::Found {
                coordinates,
                display_address: first.display_name,
            }),
            Err(err) => {
                tracing::warn!(error = %err, "geocoder returned an invalid coordinate");
                None
            }
        }
    }

    fn not_found(&self, query: &str, reason: NotFoundReason, suggestion: &str) -> ResolvedLocation {
        ResolvedLocation {
            query: query.to_string(),
            resolution: Resolution::NotFound {
                reason,
                suggestion: suggestion.to_string(),
            },
        }
    }
}
