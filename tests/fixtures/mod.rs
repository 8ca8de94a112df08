//! Test fixtures for ride-quote.
//!
//! Provides realistic test data including:
//! - Real Sri Lankan locations (from OpenStreetMap)
//! - Fake geocoder, router and fleet collaborators
//! - Builders for vehicles

#![allow(dead_code)]

pub mod sri_lanka_locations;

use std::sync::Mutex;

pub use sri_lanka_locations::*;

use ride_quote::error::ServiceError;
use ride_quote::fleet::{FleetFilter, Vehicle, VehicleStatus};
use ride_quote::traits::{
    Coordinates, FleetProvider, GeocodeCandidate, GeocodeQuery, Geocoder, RouteLeg, RouteResponse,
    RoutingService,
};

pub fn candidate(location: &Location) -> GeocodeCandidate {
    GeocodeCandidate {
        latitude: location.lat,
        longitude: location.lng,
        display_name: location.display_name.to_string(),
    }
}

pub fn point(location: &Location) -> Coordinates {
    Coordinates::new(location.lat, location.lng).expect("fixture coordinates are valid")
}

/// Geocoder answering from canned entries.
///
/// The first entry whose needle occurs in the lowercased query wins; its
/// candidates are truncated to the query limit. Unmatched queries find
/// nothing. Every query is recorded.
#[derive(Default)]
pub struct FakeGeocoder {
    entries: Vec<(String, Vec<GeocodeCandidate>)>,
    fail_with: Option<String>,
    pub calls: Mutex<Vec<(String, usize)>>,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, needle: &str, locations: &[Location]) -> Self {
        self.entries
            .push((needle.to_lowercase(), locations.iter().map(candidate).collect()));
        self
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl Geocoder for FakeGeocoder {
    fn search(&self, query: &GeocodeQuery<'_>) -> Result<Vec<GeocodeCandidate>, ServiceError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((query.text.to_string(), query.limit));

        if let Some(message) = &self.fail_with {
            return Err(ServiceError::Unavailable(message.clone()));
        }

        let lower = query.text.to_lowercase();
        Ok(self
            .entries
            .iter()
            .find(|(needle, _)| lower.contains(needle.as_str()))
            .map(|(_, candidates)| candidates.iter().take(query.limit).cloned().collect())
            .unwrap_or_default())
    }
}

/// Router returning a fixed answer (or failure) and counting calls.
pub struct FakeRouter {
    response: Result<RouteResponse, String>,
    pub calls: Mutex<usize>,
}

impl FakeRouter {
    pub fn ok(distance_m: f64, duration_s: f64) -> Self {
        Self::responding("Ok", vec![RouteLeg { distance_m, duration_s }])
    }

    pub fn responding(code: &str, routes: Vec<RouteLeg>) -> Self {
        Self {
            response: Ok(RouteResponse {
                code: code.to_string(),
                routes,
            }),
            calls: Mutex::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().expect("calls lock")
    }
}

impl RoutingService for FakeRouter {
    fn route(
        &self,
        _origin: Coordinates,
        _destination: Coordinates,
    ) -> Result<RouteResponse, ServiceError> {
        *self.calls.lock().expect("calls lock") += 1;
        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err(message) => Err(ServiceError::Unavailable(message.clone())),
        }
    }
}

/// Fleet provider that always fails.
pub struct BrokenFleet;

impl FleetProvider for BrokenFleet {
    fn available_vehicles(&self, _filter: &FleetFilter) -> Result<Vec<Vehicle>, ServiceError> {
        Err(ServiceError::Unavailable("fleet database offline".to_string()))
    }
}

// ============================================================================
// Vehicle builders
// ============================================================================

pub struct VehicleBuilder {
    vehicle: Vehicle,
}

pub fn vehicle(id: &str, vehicle_type: &str, capacity: u32) -> VehicleBuilder {
    VehicleBuilder {
        vehicle: Vehicle {
            vehicle_id: id.to_string(),
            vehicle_type: vehicle_type.to_string(),
            capacity,
            features: Vec::new(),
            current_location: "Gampaha".to_string(),
            status: VehicleStatus::Available,
            license_plate: None,
            year: None,
            make: None,
            model: None,
        },
    }
}

impl VehicleBuilder {
    pub fn feature(mut self, feature: &str) -> Self {
        self.vehicle.features.push(feature.to_string());
        self
    }

    pub fn at(mut self, location: &str) -> Self {
        self.vehicle.current_location = location.to_string();
        self
    }

    pub fn status(mut self, status: VehicleStatus) -> Self {
        self.vehicle.status = status;
        self
    }

    pub fn build(self) -> Vehicle {
        self.vehicle
    }
}

/// One available vehicle per category, all near Gampaha.
pub fn mixed_fleet() -> Vec<Vehicle> {
    vec![
        vehicle("ECO-1", "Economy", 4).feature("air_conditioning").build(),
        vehicle("STD-1", "Sedan", 4).feature("air_conditioning").build(),
        vehicle("SUV-1", "SUV", 6).feature("air_conditioning").build(),
        vehicle("VAN-1", "Van", 10)
            .feature("air_conditioning")
            .feature("wheelchair_accessible")
            .build(),
        vehicle("LUX-1", "Luxury Sedan", 4)
            .feature("air_conditioning")
            .feature("wifi")
            .at("Colombo 3")
            .build(),
    ]
}
