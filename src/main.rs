use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use ride_quote::config::{AppConfig, load_config};
use ride_quote::fare::FareCalculator;
use ride_quote::fleet::{InMemoryFleet, VehicleConstraints};
use ride_quote::haversine::StraightLine;
use ride_quote::nominatim::NominatimClient;
use ride_quote::osrm::OsrmClient;
use ride_quote::quote::{QuoteOutcome, TripQuoter, TripRequest};
use ride_quote::resolver::PlaceResolver;
use ride_quote::route::RouteEstimator;

#[derive(Debug, Parser)]
#[command(name = "ride-quote")]
#[command(about = "Resolve places, estimate routes and price ride offers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Geocode a free-text location.
    Resolve { text: String },
    /// Estimate a drive between two coordinates.
    Route {
        #[arg(allow_negative_numbers = true)]
        origin_lat: f64,
        #[arg(allow_negative_numbers = true)]
        origin_lon: f64,
        #[arg(allow_negative_numbers = true)]
        destination_lat: f64,
        #[arg(allow_negative_numbers = true)]
        destination_lon: f64,
    },
    /// Price a trip for a vehicle type.
    Fare {
        distance_km: f64,
        duration_minutes: f64,
        vehicle_type: String,
        #[arg(long, default_value_t = 1.0)]
        surge: f64,
    },
    /// Quote ranked offers for a trip.
    Quote {
        #[arg(long)]
        pickup: String,
        #[arg(long)]
        dropoff: String,
        #[arg(long, default_value_t = 1)]
        passengers: u32,
        /// Required vehicle feature; repeatable.
        #[arg(long = "feature")]
        features: Vec<String>,
        #[arg(long)]
        vehicle_type: Option<String>,
        /// Only vehicles currently near this location.
        #[arg(long)]
        near: Option<String>,
        /// JSON array of vehicle records.
        #[arg(long, env = "RIDE_QUOTE_FLEET_FILE", default_value = "data/fleet.json")]
        fleet: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // --help must not depend on a valid environment.
    let cli = Cli::parse();
    let config = load_config().context("loading configuration")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str())),
        )
        .with_writer(std::io::stderr)
        .init();

    run(cli.command, &config)
}

fn run(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Commands::Resolve { text } => {
            let resolver = resolver(config)?;
            print_json(&resolver.resolve(&text)?)
        }
        Commands::Route {
            origin_lat,
            origin_lon,
            destination_lat,
            destination_lon,
        } => {
            let estimator = estimator(config)?;
            let estimate =
                estimator.route_between(origin_lat, origin_lon, destination_lat, destination_lon)?;
            print_json(&estimate)
        }
        Commands::Fare {
            distance_km,
            duration_minutes,
            vehicle_type,
            surge,
        } => {
            let fares = FareCalculator::new(config.pricing.clone())?;
            let fare = fares.estimate_cost(distance_km, duration_minutes, &vehicle_type, surge)?;
            print_json(&fare.rounded())
        }
        Commands::Quote {
            pickup,
            dropoff,
            passengers,
            features,
            vehicle_type,
            near,
            fleet,
        } => {
            let fleet = InMemoryFleet::from_json_file(&fleet)?;
            let quoter = TripQuoter::new(
                resolver(config)?,
                estimator(config)?,
                FareCalculator::new(config.pricing.clone())?,
                fleet,
                config.quote.clone(),
            )?;
            let request = TripRequest {
                pickup,
                dropoff,
                passenger_count: passengers,
                constraints: VehicleConstraints {
                    required_features: features,
                    vehicle_type,
                    near_location: near,
                },
            };
            let mut outcome = quoter.quote(&request)?;
            if let QuoteOutcome::Quoted { quotes } = &mut outcome {
                for quote in quotes.iter_mut() {
                    quote.fare = quote.fare.rounded();
                }
            }
            print_json(&outcome)
        }
    }
}

fn resolver(config: &AppConfig) -> anyhow::Result<PlaceResolver<NominatimClient>> {
    let client = NominatimClient::new(config.nominatim.clone()).context("building geocoder")?;
    Ok(PlaceResolver::new(client, config.places.clone()))
}

fn estimator(config: &AppConfig) -> anyhow::Result<RouteEstimator<OsrmClient>> {
    let client = OsrmClient::new(config.osrm.clone()).context("building OSRM client")?;
    Ok(RouteEstimator::new(
        client,
        StraightLine::new(config.fallback_speed_kmh),
    ))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
