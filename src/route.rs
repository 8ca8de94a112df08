//! Route estimation with a deterministic straight-line fallback.

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::haversine::StraightLine;
use crate::traits::{Coordinates, RouteResponse, RoutingService};

const FALLBACK_NOTE: &str = "Routing service unavailable. Using straight-line distance estimate.";

/// How a [`RouteEstimate`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMethod {
    NetworkRouted,
    StraightLineFallback,
}

/// A named end of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEndpoint {
    pub name: String,
    #[serde(flatten)]
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEstimate {
    pub origin: RouteEndpoint,
    pub destination: RouteEndpoint,
    /// Always >= 0.
    pub distance_km: f64,
    /// Always >= 0. Derived from distance under `StraightLineFallback`.
    pub duration_minutes: f64,
    pub method: RouteMethod,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Estimates driving distance and duration between two points.
///
/// Never fails once coordinates are valid: any routing failure degrades to
/// the haversine estimate.
#[derive(Debug, Clone)]
pub struct RouteEstimator<R> {
    service: R,
    fallback: StraightLine,
}

impl<R: RoutingService> RouteEstimator<R> {
    pub fn new(service: R, fallback: StraightLine) -> Self {
        Self { service, fallback }
    }

    /// Validates raw coordinates, then routes between them.
    pub fn route_between(
        &self,
        origin_lat: f64,
        origin_lon: f64,
        destination_lat: f64,
        destination_lon: f64,
    ) -> Result<RouteEstimate, QuoteError> {
        let origin = Coordinates::new(origin_lat, origin_lon)?;
        let destination = Coordinates::new(destination_lat, destination_lon)?;
        Ok(self.route(origin, destination))
    }

    pub fn route(&self, origin: Coordinates, destination: Coordinates) -> RouteEstimate {
        self.route_named(
            RouteEndpoint {
                name: "Origin".to_string(),
                coordinates: origin,
            },
            RouteEndpoint {
                name: "Destination".to_string(),
                coordinates: destination,
            },
        )
    }

    pub fn route_named(&self, origin: RouteEndpoint, destination: RouteEndpoint) -> RouteEstimate {
        let response = self.service.route(origin.coordinates, destination.coordinates);

        match response {
            Ok(body) => match network_leg(&body) {
                Some((distance_km, duration_minutes)) => {
                    tracing::debug!(distance_km, duration_minutes, "network route found");
                    RouteEstimate {
                        origin,
                        destination,
                        distance_km,
                        duration_minutes,
                        method: RouteMethod::NetworkRouted,
                        summary: format!(
                            "{distance_km} km, approximately {duration_minutes} minutes"
                        ),
                        note: None,
                    }
                }
                None => {
                    tracing::warn!(
                        code = %body.code,
                        routes = body.routes.len(),
                        "routing returned no usable route, using straight-line estimate"
                    );
                    self.fallback_estimate(origin, destination)
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "routing request failed, using straight-line estimate");
                self.fallback_estimate(origin, destination)
            }
        }
    }

    fn fallback_estimate(&self, origin: RouteEndpoint, destination: RouteEndpoint) -> RouteEstimate {
        let (distance_km, duration_minutes) =
            self.fallback.estimate(origin.coordinates, destination.coordinates);
        RouteEstimate {
            origin,
            destination,
            distance_km,
            duration_minutes,
            method: RouteMethod::StraightLineFallback,
            summary: format!(
                "~{distance_km} km (straight-line), approximately {duration_minutes} minutes"
            ),
            note: Some(FALLBACK_NOTE.to_string()),
        }
    }
}

/// First route of an `Ok` response, as (km, minutes). Negative or non-finite
/// values are treated as unusable.
fn network_leg(body: &RouteResponse) -> Option<(f64, f64)> {
    if body.code != "Ok" {
        return None;
    }
    let leg = body.routes.first()?;
    if !leg.distance_m.is_finite()
        || !leg.duration_s.is_finite()
        || leg.distance_m < 0.0
        || leg.duration_s < 0.0
    {
        return None;
    }
    Some((
        round_to(leg.distance_m / 1000.0, 2),
        round_to(leg.duration_s / 60.0, 1),
    ))
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
