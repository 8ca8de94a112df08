//! ride-quote core
//!
//! Resolves free-text places, estimates routes and prices vehicle offers for
//! a ride-booking assistant.

pub mod config;
pub mod error;
pub mod fare;
pub mod fleet;
pub mod haversine;
pub mod nominatim;
pub mod osrm;
pub mod places;
pub mod quote;
pub mod resolver;
pub mod route;
pub mod throttle;
pub mod traits;
