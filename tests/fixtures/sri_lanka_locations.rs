//! Real Sri Lankan locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. Display names follow the shape
//! Nominatim returns for these places.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub display_name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, display_name: &'static str, lat: f64, lng: f64) -> Self {
        Self {
            name,
            display_name,
            lat,
            lng,
        }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

// ============================================================================
// Transport hubs
// ============================================================================

pub const COLOMBO_FORT: Location = Location::new(
    "Colombo Fort",
    "Fort, Colombo, Colombo District, Western Province, 00100, Sri Lanka",
    6.9344,
    79.8428,
);

pub const GAMPAHA_BUS_STAND: Location = Location::new(
    "Gampaha Bus Stand",
    "Gampaha Bus Stand, Gampaha, Gampaha District, Western Province, Sri Lanka",
    7.0917,
    79.9999,
);

pub const KANDY_RAILWAY_STATION: Location = Location::new(
    "Kandy Railway Station",
    "Kandy Railway Station, Kandy, Kandy District, Central Province, Sri Lanka",
    7.2906,
    80.6337,
);

pub const BIA_AIRPORT: Location = Location::new(
    "Bandaranaike International Airport",
    "Bandaranaike International Airport, Katunayake, Gampaha District, Western Province, Sri Lanka",
    7.1808,
    79.8841,
);

// ============================================================================
// Neighbourhoods and city centres (broad-query candidates)
// ============================================================================

pub const COLOMBO_CANDIDATES: &[Location] = &[
    Location::new("Colombo", "Colombo, Colombo District, Western Province, Sri Lanka", 6.9271, 79.8612),
    Location::new("Colombo 7", "Cinnamon Gardens, Colombo 7, Western Province, Sri Lanka", 6.9110, 79.8646),
    Location::new("Pettah", "Pettah, Colombo, Western Province, Sri Lanka", 6.9366, 79.8500),
];

pub const BAMBALAPITIYA: Location = Location::new(
    "Bambalapitiya",
    "Bambalapitiya, Colombo 04, Western Province, Sri Lanka",
    6.8893,
    79.8561,
);

pub const GALLE_FORT: Location = Location::new(
    "Galle Fort",
    "Galle Fort, Galle, Galle District, Southern Province, Sri Lanka",
    6.0267,
    80.2170,
);

pub const MATARA_CANDIDATES: &[Location] = &[
    Location::new("Matara", "Matara, Matara District, Southern Province, Sri Lanka", 5.9549, 80.5550),
    Location::new("Matara Fort", "Matara Fort, Matara, Southern Province, Sri Lanka", 5.9445, 80.5473),
];
