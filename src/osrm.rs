//! OSRM HTTP adapter for driving routes.

use std::time::Duration;

use crate::error::ServiceError;
use crate::throttle::Throttle;
use crate::traits::{Coordinates, RouteResponse, RoutingService};

#[derive(Debug, Clone, PartialEq)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
    /// Minimum spacing between request starts.
    pub min_request_interval_ms: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
            min_request_interval_ms: 500,
        }
    }
}

#[derive(Debug)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
    throttle: Throttle,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let throttle = Throttle::new(Duration::from_millis(config.min_request_interval_ms));

        Ok(Self {
            config,
            client,
            throttle,
        })
    }

    fn route_url(&self, origin: Coordinates, destination: Coordinates) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        )
    }
}

impl RoutingService for OsrmClient {
    fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RouteResponse, ServiceError> {
        let url = self.route_url(origin, destination);
        let _permit = self.throttle.acquire();

        tracing::debug!(url = %url, "requesting OSRM route");
        let response = self
            .client
            .get(&url)
            .query(&[("overview", "false"), ("steps", "false")])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.json::<RouteResponse>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_url_orders_lon_lat() {
        let client = OsrmClient::new(OsrmConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..OsrmConfig::default()
        })
        .expect("client");
        let origin = Coordinates::new(7.0917, 79.9999).expect("origin");
        let destination = Coordinates::new(6.9344, 79.8428).expect("destination");
        assert_eq!(
            client.route_url(origin, destination),
            "http://localhost:5000/route/v1/driving/79.999900,7.091700;79.842800,6.934400"
        );
    }
}
