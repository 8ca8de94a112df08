//! Trip quoting: resolve both ends, route, price the fleet, rank offers.
//!
//! This covers the "route computed → quote presented" step of a booking
//! conversation. Selection and booking happen elsewhere.

use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::fare::{FareBreakdown, FareCalculator};
use crate::fleet::{Vehicle, VehicleConstraints};
use crate::resolver::{PlaceResolver, ResolvedLocation};
use crate::route::{RouteEndpoint, RouteEstimate, RouteEstimator};
use crate::traits::{FleetProvider, Geocoder, RoutingService};

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteOptions {
    /// Applied to every offer.
    pub surge_multiplier: f64,
    /// Upper bound on offers returned.
    pub max_offers: usize,
}

impl Default for QuoteOptions {
    fn default() -> Self {
        Self {
            surge_multiplier: 1.0,
            max_offers: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub pickup: String,
    pub dropoff: String,
    pub passenger_count: u32,
    #[serde(default)]
    pub constraints: VehicleConstraints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripLeg {
    Pickup,
    Dropoff,
}

/// One priced vehicle offer for a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripQuote {
    pub pickup: ResolvedLocation,
    pub dropoff: ResolvedLocation,
    pub route: RouteEstimate,
    pub vehicle: Vehicle,
    pub fare: FareBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QuoteOutcome {
    /// Ranked offers; empty when no vehicle fits.
    Quoted { quotes: Vec<TripQuote> },
    /// A location was ambiguous or unknown; ask the user about this leg.
    NeedsClarification {
        leg: TripLeg,
        location: ResolvedLocation,
    },
}

pub struct TripQuoter<G, R, F> {
    resolver: PlaceResolver<G>,
    estimator: RouteEstimator<R>,
    fares: FareCalculator,
    fleet: F,
    options: QuoteOptions,
}

impl<G, R, F> TripQuoter<G, R, F>
where
    G: Geocoder,
    R: RoutingService,
    F: FleetProvider,
{
    pub fn new(
        resolver: PlaceResolver<G>,
        estimator: RouteEstimator<R>,
        fares: FareCalculator,
        fleet: F,
        options: QuoteOptions,
    ) -> Result<Self, QuoteError> {
        if !options.surge_multiplier.is_finite() || options.surge_multiplier <= 0.0 {
            return Err(QuoteError::invalid("surge multiplier must be positive"));
        }
        if options.max_offers == 0 {
            return Err(QuoteError::invalid("max_offers must be at least 1"));
        }
        Ok(Self {
            resolver,
            estimator,
            fares,
            fleet,
            options,
        })
    }

    pub fn resolver(&self) -> &PlaceResolver<G> {
        &self.resolver
    }

    pub fn estimator(&self) -> &RouteEstimator<R> {
        &self.estimator
    }

    pub fn fares(&self) -> &FareCalculator {
        &self.fares
    }

    pub fn quote(&self, request: &TripRequest) -> Result<QuoteOutcome, QuoteError> {
        if request.passenger_count == 0 {
            return Err(QuoteError::invalid("passenger count must be at least 1"));
        }

        // Sequential: the geocoder is rate limited.
        let pickup = self.resolver.resolve(&request.pickup)?;
        let Some(pickup_point) = pickup.coordinates() else {
            return Ok(QuoteOutcome::NeedsClarification {
                leg: TripLeg::Pickup,
                location: pickup,
            });
        };
        let dropoff = self.resolver.resolve(&request.dropoff)?;
        let Some(dropoff_point) = dropoff.coordinates() else {
            return Ok(QuoteOutcome::NeedsClarification {
                leg: TripLeg::Dropoff,
                location: dropoff,
            });
        };

        let route = self.estimator.route_named(
            RouteEndpoint {
                name: pickup.query.clone(),
                coordinates: pickup_point,
            },
            RouteEndpoint {
                name: dropoff.query.clone(),
                coordinates: dropoff_point,
            },
        );

        let filter = request.constraints.fleet_filter();
        let listed = self.fleet.available_vehicles(&filter).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "fleet listing failed, quoting no vehicles");
            Vec::new()
        });
        let listed_count = listed.len();

        let suitable: Vec<Vehicle> = listed
            .into_iter()
            .filter(|vehicle| vehicle.capacity >= request.passenger_count)
            .filter(|vehicle| vehicle.has_features(&request.constraints.required_features))
            .collect();

        let fares = &self.fares;
        let surge = self.options.surge_multiplier;
        let (distance_km, duration_minutes) = (route.distance_km, route.duration_minutes);
        let offers = suitable
            .into_par_iter()
            .map(|vehicle| {
                fares
                    .estimate_cost(distance_km, duration_minutes, &vehicle.vehicle_type, surge)
                    .map(|fare| Offer { vehicle, fare })
            })
            .collect::<Result<Vec<Offer>, QuoteError>>()?;
        let priced_count = offers.len();

        let ranked = rank_offers(offers, request.passenger_count, self.options.max_offers);

        tracing::info!(
            pickup = %pickup.query,
            dropoff = %dropoff.query,
            distance_km = route.distance_km,
            listed = listed_count,
            suitable = priced_count,
            offered = ranked.len(),
            "trip quoted"
        );

        let quotes = ranked
            .into_iter()
            .map(|offer| TripQuote {
                pickup: pickup.clone(),
                dropoff: dropoff.clone(),
                route: route.clone(),
                vehicle: offer.vehicle,
                fare: offer.fare,
            })
            .collect();

        Ok(QuoteOutcome::Quoted { quotes })
    }
}

#[derive(Debug, Clone)]
struct Offer {
    vehicle: Vehicle,
    fare: FareBreakdown,
}

/// Cheapest first, then tighter capacity fit, then vehicle id for stability.
fn compare_offers(a: &Offer, b: &Offer, passengers: u32) -> Ordering {
    let slack = |offer: &Offer| offer.vehicle.capacity.saturating_sub(passengers);
    a.fare
        .total
        .total_cmp(&b.fare.total)
        .then_with(|| slack(a).cmp(&slack(b)))
        .then_with(|| a.vehicle.vehicle_id.cmp(&b.vehicle.vehicle_id))
}

/// Picks up to `max` offers spread across comfort tiers.
///
/// The best offer of each category competes for a slot; with more categories
/// than slots the lowest, highest and evenly spaced middle tiers win. The
/// overall cheapest offer is always kept. Free slots go to the next-best
/// offers regardless of category.
fn rank_offers(mut offers: Vec<Offer>, passengers: u32, max: usize) -> Vec<Offer> {
    offers.sort_by(|a, b| compare_offers(a, b, passengers));
    if offers.is_empty() || max == 0 {
        return Vec::new();
    }

    let mut category_best: Vec<usize> = Vec::new();
    for (index, offer) in offers.iter().enumerate() {
        let category = offer.fare.category;
        if !category_best
            .iter()
            .any(|&seen| offers[seen].fare.category == category)
        {
            category_best.push(index);
        }
    }
    category_best.sort_by_key(|&index| offers[index].fare.category.comfort_rank());

    let mut chosen = spread(&category_best, max);
    if !chosen.contains(&0) {
        chosen[0] = 0;
    }
    for index in 0..offers.len() {
        if chosen.len() >= max {
            break;
        }
        if !chosen.contains(&index) {
            chosen.push(index);
        }
    }
    chosen.sort_unstable();

    offers
        .into_iter()
        .enumerate()
        .filter(|(index, _)| chosen.contains(index))
        .map(|(_, offer)| offer)
        .collect()
}

/// Evenly spaced picks from `items`, always including both ends.
fn spread(items: &[usize], max: usize) -> Vec<usize> {
    if items.len() <= max {
        return items.to_vec();
    }
    if max == 1 {
        return vec![items[0]];
    }
    let last = (items.len() - 1) as f64;
    let mut picks: Vec<usize> = (0..max)
        .map(|slot| items[(slot as f64 * last / (max - 1) as f64).round() as usize])
        .collect();
    picks.dedup();
    picks
}
