//! Application configuration.
//!
//! Every component takes its configuration at construction; nothing reads
//! the environment after startup.

use crate::error::ConfigError;
use crate::fare::PricingConfig;
use crate::haversine::DEFAULT_SPEED_KMH;
use crate::nominatim::NominatimConfig;
use crate::osrm::OsrmConfig;
use crate::places::PlaceTables;
use crate::quote::QuoteOptions;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub nominatim: NominatimConfig,
    pub osrm: OsrmConfig,
    /// Assumed average speed for straight-line estimates.
    pub fallback_speed_kmh: f64,
    pub places: PlaceTables,
    pub pricing: PricingConfig,
    pub quote: QuoteOptions,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            nominatim: NominatimConfig::default(),
            osrm: OsrmConfig::default(),
            fallback_speed_kmh: DEFAULT_SPEED_KMH,
            places: PlaceTables::default(),
            pricing: PricingConfig::default(),
            quote: QuoteOptions::default(),
            log_level: "info".to_string(),
        }
    }
}

/// Load configuration from the environment, reading `.env` first if present.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an unparsable value.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_config(|key| std::env::var(key))
}

/// Core parsing, decoupled from the process environment so tests can feed a
/// plain map.
pub fn build_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = AppConfig::default();

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let parse_positive_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        let value = parse_u64(var, default)?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    let parse_positive_f64 = |var: &str, default: f64| -> Result<f64, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        let value = raw.trim().parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be a positive number, got {value}"),
            })
        }
    };

    let timeout_secs =
        parse_positive_u64("RIDE_QUOTE_HTTP_TIMEOUT_SECS", defaults.nominatim.timeout_secs)?;

    let nominatim = NominatimConfig {
        base_url: or_default("RIDE_QUOTE_NOMINATIM_URL", &defaults.nominatim.base_url),
        user_agent: or_default("RIDE_QUOTE_USER_AGENT", &defaults.nominatim.user_agent),
        timeout_secs,
        min_request_interval_ms: parse_u64(
            "RIDE_QUOTE_GEOCODE_INTERVAL_MS",
            defaults.nominatim.min_request_interval_ms,
        )?,
    };

    let osrm = OsrmConfig {
        base_url: or_default("RIDE_QUOTE_OSRM_URL", &defaults.osrm.base_url),
        profile: or_default("RIDE_QUOTE_OSRM_PROFILE", &defaults.osrm.profile),
        timeout_secs,
        min_request_interval_ms: parse_u64(
            "RIDE_QUOTE_ROUTE_INTERVAL_MS",
            defaults.osrm.min_request_interval_ms,
        )?,
    };

    let fallback_speed_kmh =
        parse_positive_f64("RIDE_QUOTE_FALLBACK_SPEED_KMH", defaults.fallback_speed_kmh)?;

    let quote = QuoteOptions {
        surge_multiplier: parse_positive_f64(
            "RIDE_QUOTE_SURGE_MULTIPLIER",
            defaults.quote.surge_multiplier,
        )?,
        ..defaults.quote
    };

    Ok(AppConfig {
        nominatim,
        osrm,
        fallback_speed_kmh,
        quote,
        log_level: or_default("RIDE_QUOTE_LOG_LEVEL", &defaults.log_level),
        ..defaults
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env::VarError;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, VarError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = build_config(lookup_from(&[])).expect("config");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.nominatim.min_request_interval_ms, 1000);
        assert_eq!(config.osrm.min_request_interval_ms, 500);
        assert_eq!(config.fallback_speed_kmh, 50.0);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = build_config(lookup_from(&[
            ("RIDE_QUOTE_NOMINATIM_URL", "http://geo.local"),
            ("RIDE_QUOTE_OSRM_URL", "http://osrm.local:5000"),
            ("RIDE_QUOTE_OSRM_PROFILE", "car"),
            ("RIDE_QUOTE_HTTP_TIMEOUT_SECS", "3"),
            ("RIDE_QUOTE_GEOCODE_INTERVAL_MS", "0"),
            ("RIDE_QUOTE_FALLBACK_SPEED_KMH", "40"),
            ("RIDE_QUOTE_SURGE_MULTIPLIER", "1.5"),
            ("RIDE_QUOTE_LOG_LEVEL", "debug"),
        ]))
        .expect("config");

        assert_eq!(config.nominatim.base_url, "http://geo.local");
        assert_eq!(config.nominatim.timeout_secs, 3);
        assert_eq!(config.nominatim.min_request_interval_ms, 0);
        assert_eq!(config.osrm.base_url, "http://osrm.local:5000");
        assert_eq!(config.osrm.profile, "car");
        assert_eq!(config.osrm.timeout_secs, 3);
        assert_eq!(config.fallback_speed_kmh, 40.0);
        assert_eq!(config.quote.surge_multiplier, 1.5);
        assert_eq!(config.quote.max_offers, 3);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let err = build_config(lookup_from(&[("RIDE_QUOTE_HTTP_TIMEOUT_SECS", "soon")]))
            .expect_err("should fail");
        assert!(err.to_string().contains("RIDE_QUOTE_HTTP_TIMEOUT_SECS"));
    }

    #[test]
    fn test_non_positive_surge_is_rejected() {
        assert!(build_config(lookup_from(&[("RIDE_QUOTE_SURGE_MULTIPLIER", "-1")])).is_err());
        assert!(build_config(lookup_from(&[("RIDE_QUOTE_FALLBACK_SPEED_KMH", "0")])).is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = build_config(lookup_from(&[("RIDE_QUOTE_HTTP_TIMEOUT_SECS", "0")]))
            .expect_err("zero timeout should fail");
        assert!(err.to_string().contains("RIDE_QUOTE_HTTP_TIMEOUT_SECS"));

        // Request spacing may still be disabled.
        let config = build_config(lookup_from(&[("RIDE_QUOTE_ROUTE_INTERVAL_MS", "0")]))
            .expect("config");
        assert_eq!(config.osrm.min_request_interval_ms, 0);
    }
}
