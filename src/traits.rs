//! Collaborator seams for the quoting pipeline.
//!
//! These are intentionally minimal. HTTP adapters in [`crate::nominatim`],
//! [`crate::osrm`] and [`crate::fleet`] implement them for the real services;
//! tests implement them with canned data.

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, ServiceError};
use crate::fleet::{FleetFilter, Vehicle};

/// A validated point on the globe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Fails with `InvalidInput` unless latitude is within [-90, 90] and
    /// longitude within [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, QuoteError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(QuoteError::invalid(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(QuoteError::invalid(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// (lat, lng) pair.
    pub fn pair(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// One geocoding request.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeQuery<'a> {
    pub text: &'a str,
    /// ISO 3166-1 alpha-2 restriction, e.g. "lk".
    pub country_code: &'a str,
    /// Maximum number of candidates wanted.
    pub limit: usize,
}

/// A geocoder match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

/// Turns free text into candidate places.
pub trait Geocoder {
    fn search(&self, query: &GeocodeQuery<'_>) -> Result<Vec<GeocodeCandidate>, ServiceError>;
}

/// Raw routing answer: a status code plus zero or more candidate routes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteResponse {
    pub code: String,
    #[serde(default)]
    pub routes: Vec<RouteLeg>,
}

/// One candidate route, in meters and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RouteLeg {
    #[serde(rename = "distance")]
    pub distance_m: f64,
    #[serde(rename = "duration")]
    pub duration_s: f64,
}

/// Computes driving routes over a road network.
pub trait RoutingService {
    fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RouteResponse, ServiceError>;
}

/// Lists vehicles currently available for dispatch.
pub trait FleetProvider {
    fn available_vehicles(&self, filter: &FleetFilter) -> Result<Vec<Vehicle>, ServiceError>;
}

impl<T: Geocoder + ?Sized> Geocoder for &T {
    fn search(&self, query: &GeocodeQuery<'_>) -> Result<Vec<GeocodeCandidate>, ServiceError> {
        (**self).search(query)
    }
}

impl<T: RoutingService + ?Sized> RoutingService for &T {
    fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RouteResponse, ServiceError> {
        (**self).route(origin, destination)
    }
}

impl<T: FleetProvider + ?Sized> FleetProvider for &T {
    fn available_vehicles(&self, filter: &FleetFilter) -> Result<Vec<Vehicle>, ServiceError> {
        (**self).available_vehicles(filter)
    }
}
