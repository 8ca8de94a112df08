//! Fleet records and an in-memory availability store.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::traits::FleetProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    OnTrip,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub vehicle_id: String,
    /// Declared type label, e.g. "Sedan", "SUV", "Luxury Sedan". Priced via
    /// [`crate::fare::VehicleCategory::from_label`].
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub capacity: u32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub current_location: String,
    pub status: VehicleStatus,
    #[serde(default)]
    pub license_plate: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl Vehicle {
    /// True when every required feature is listed exactly.
    pub fn has_features(&self, required: &[String]) -> bool {
        required.iter().all(|feature| self.features.contains(feature))
    }
}

/// Provider-side listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetFilter {
    /// Exact type label, compared case-insensitively.
    pub vehicle_type: Option<String>,
    /// Substring of the vehicle's current location, case-insensitive.
    pub location: Option<String>,
}

/// Caller constraints for a quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleConstraints {
    /// Exact-match features, e.g. "wheelchair_accessible".
    #[serde(default)]
    pub required_features: Vec<String>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub near_location: Option<String>,
}

impl VehicleConstraints {
    pub fn fleet_filter(&self) -> FleetFilter {
        FleetFilter {
            vehicle_type: self.vehicle_type.clone(),
            location: self.near_location.clone(),
        }
    }
}

/// Fleet held in memory, e.g. loaded from a JSON export.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFleet {
    vehicles: Vec<Vehicle>,
}

impl InMemoryFleet {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    /// Reads a JSON array of vehicle records.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| {
            ServiceError::Unavailable(format!("reading fleet file {}: {err}", path.display()))
        })?;
        let vehicles: Vec<Vehicle> = serde_json::from_str(&raw).map_err(|err| {
            ServiceError::Unavailable(format!("parsing fleet file {}: {err}", path.display()))
        })?;
        tracing::debug!(count = vehicles.len(), path = %path.display(), "loaded fleet");
        Ok(Self::new(vehicles))
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }
}

impl FleetProvider for InMemoryFleet {
    fn available_vehicles(&self, filter: &FleetFilter) -> Result<Vec<Vehicle>, ServiceError> {
        let vehicle_type = filter.vehicle_type.as_deref().map(str::to_lowercase);
        let location = filter.location.as_deref().map(str::to_lowercase);

        Ok(self
            .vehicles
            .iter()
            .filter(|vehicle| vehicle.status == VehicleStatus::Available)
            .filter(|vehicle| {
                vehicle_type
                    .as_ref()
                    .is_none_or(|wanted| vehicle.vehicle_type.to_lowercase() == *wanted)
            })
            .filter(|vehicle| {
                location.as_ref().is_none_or(|wanted| {
                    vehicle.current_location.to_lowercase().contains(wanted.as_str())
                })
            })
            .cloned()
            .collect())
    }
}
