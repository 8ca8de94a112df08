//! OpenStreetMap Nominatim adapter for place search.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

use crate::error::ServiceError;
use crate::throttle::Throttle;
use crate::traits::{GeocodeCandidate, GeocodeQuery, Geocoder};

#[derive(Debug, Clone, PartialEq)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying agent.
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Public Nominatim allows one request per second.
    pub min_request_interval_ms: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "ride-quote/0.1 (sri-lanka-dispatch-service)".to_string(),
            timeout_secs: 10,
            min_request_interval_ms: 1000,
        }
    }
}

#[derive(Debug)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
    throttle: Throttle,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, ServiceError> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent).map_err(|err| {
            ServiceError::Unavailable(format!("invalid user agent {:?}: {err}", config.user_agent))
        })?;
        headers.insert(USER_AGENT, agent);

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;
        let throttle = Throttle::new(Duration::from_millis(config.min_request_interval_ms));

        Ok(Self {
            config,
            client,
            throttle,
        })
    }
}

impl Geocoder for NominatimClient {
    fn search(&self, query: &GeocodeQuery<'_>) -> Result<Vec<GeocodeCandidate>, ServiceError> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let limit = query.limit.to_string();
        let _permit = self.throttle.acquire();

        tracing::debug!(query = query.text, limit = query.limit, "requesting Nominatim search");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.text),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("countrycodes", query.country_code),
                ("addressdetails", "1"),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let places = response.json::<Vec<NominatimPlace>>()?;
        Ok(places.into_iter().filter_map(NominatimPlace::into_candidate).collect())
    }
}

/// Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

impl NominatimPlace {
    fn into_candidate(self) -> Option<GeocodeCandidate> {
        let latitude = self.lat.trim().parse::<f64>().ok()?;
        let longitude = self.lon.trim().parse::<f64>().ok()?;
        Some(GeocodeCandidate {
            latitude,
            longitude,
            display_name: self.display_name,
        })
    }
}
