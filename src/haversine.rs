//! Straight-line route estimate (fallback when OSRM is unavailable).
//!
//! Uses great-circle distance and an assumed average speed.
//! Less accurate than OSRM (ignores roads) but always available.

use crate::route::round_to;
use crate::traits::Coordinates;

/// Average driving speed assumption for time estimation. Tunable; this is an
/// approximation of Sri Lankan traffic, not a measured figure.
pub const DEFAULT_SPEED_KMH: f64 = 50.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine-based travel estimator.
#[derive(Debug, Clone)]
pub struct StraightLine {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for StraightLine {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl StraightLine {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Distance in km (2 decimals) and duration in minutes (1 decimal).
    ///
    /// Duration is derived from the rounded distance so that it always equals
    /// `round(distance_km / speed * 60, 1)` for the reported distance.
    pub fn estimate(&self, from: Coordinates, to: Coordinates) -> (f64, f64) {
        let distance_km = round_to(haversine_km(from.pair(), to.pair()), 2);
        (distance_km, self.minutes_for(distance_km))
    }

    /// Convert distance in km to travel time in minutes (1 decimal).
    pub fn minutes_for(&self, km: f64) -> f64 {
        round_to(km / self.speed_kmh * 60.0, 1)
    }
}

/// Great-circle distance between two (lat, lng) points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> Coordinates {
        Coordinates::new(lat, lng).expect("valid coordinates")
    }

    #[test]
    fn test_haversine_same_point() {
        let dist = haversine_km((6.9344, 79.8428), (6.9344, 79.8428));
        assert!(dist < 0.001, "Same point should have ~0 distance");
    }

    #[test]
    fn test_haversine_known_distance() {
        // Colombo Fort (6.934, 79.843) to Kandy (7.291, 80.636)
        // Straight-line distance ~96 km
        let dist = haversine_km((6.934, 79.843), (7.291, 80.636));
        assert!(dist > 90.0 && dist < 100.0, "Colombo to Kandy should be ~96km, got {}", dist);
    }

    #[test]
    fn test_haversine_antipodal_points() {
        let dist = haversine_km((0.0, 0.0), (0.0, 180.0));
        let half_circumference = std::f64::consts::PI * 6371.0;
        assert!((dist - half_circumference).abs() < 0.01);
    }

    #[test]
    fn test_estimate_is_symmetric() {
        let line = StraightLine::default();
        let a = point(7.0917, 79.9999);
        let b = point(6.9344, 79.8428);
        assert_eq!(line.estimate(a, b), line.estimate(b, a));
    }

    #[test]
    fn test_duration_follows_rounded_distance() {
        let line = StraightLine::default();
        let (km, minutes) = line.estimate(point(7.0917, 79.9999), point(6.9344, 79.8428));
        assert_eq!(minutes, round_to(km / 50.0 * 60.0, 1));
    }

    #[test]
    fn test_reasonable_travel_time() {
        let line = StraightLine::new(50.0);
        // 25 km at 50 km/h = 30 minutes
        assert_eq!(line.minutes_for(25.0), 30.0);
    }

    #[test]
    fn test_custom_speed() {
        let line = StraightLine::new(40.0);
        // 10 km at 40 km/h = 15 minutes
        assert_eq!(line.minutes_for(10.0), 15.0);
    }
}
