//! Fare calculation by vehicle category.
//!
//! All amounts are in a single currency (LKR by default) and kept unrounded
//! until [`FareBreakdown::rounded`] is called for presentation.

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::route::round_to;

/// Starting fare before the category multiplier, in LKR.
pub const DEFAULT_BASE_FARE: f64 = 250.0;

pub const DEFAULT_CURRENCY: &str = "LKR";

const LUXURY_MARKERS: &[&str] = &["luxury", "premium", "mercedes", "bmw"];
const ECONOMY_MARKERS: &[&str] = &["economy", "budget"];

/// Vehicle categories, declared in ascending comfort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    Economy,
    Standard,
    Suv,
    Van,
    Luxury,
}

/// Per-category pricing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateCard {
    /// Scales the shared base fare.
    pub base_multiplier: f64,
    pub per_km: f64,
    pub per_minute: f64,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 5] = [
        VehicleCategory::Economy,
        VehicleCategory::Standard,
        VehicleCategory::Suv,
        VehicleCategory::Van,
        VehicleCategory::Luxury,
    ];

    /// Classify a free-form vehicle label. Luxury markers win over van/suv,
    /// so "Luxury Van" prices as Luxury. Unknown labels are Standard.
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        let has = |markers: &[&str]| markers.iter().any(|marker| lower.contains(marker));

        if has(LUXURY_MARKERS) {
            VehicleCategory::Luxury
        } else if lower.contains("van") {
            VehicleCategory::Van
        } else if lower.contains("suv") {
            VehicleCategory::Suv
        } else if has(ECONOMY_MARKERS) {
            VehicleCategory::Economy
        } else {
            VehicleCategory::Standard
        }
    }

    pub fn comfort_tier(&self) -> &'static str {
        match self {
            VehicleCategory::Economy => "Basic",
            VehicleCategory::Standard => "Standard",
            VehicleCategory::Suv => "Comfort",
            VehicleCategory::Van => "Spacious",
            VehicleCategory::Luxury => "Premium",
        }
    }

    /// Position in the comfort ordering, 0 = most basic.
    pub fn comfort_rank(&self) -> usize {
        *self as usize
    }

    pub fn default_rates(&self) -> RateCard {
        let (base_multiplier, per_km, per_minute) = match self {
            VehicleCategory::Economy => (1.0, 80.0, 15.0),
            VehicleCategory::Standard => (1.0, 100.0, 20.0),
            VehicleCategory::Suv => (1.2, 120.0, 25.0),
            VehicleCategory::Van => (1.3, 130.0, 26.0),
            VehicleCategory::Luxury => (1.5, 150.0, 30.0),
        };
        RateCard {
            base_multiplier,
            per_km,
            per_minute,
        }
    }
}

/// Immutable pricing tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub base_fare: f64,
    pub currency: String,
    /// Indexed by [`VehicleCategory::comfort_rank`].
    pub rates: [RateCard; 5],
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_fare: DEFAULT_BASE_FARE,
            currency: DEFAULT_CURRENCY.to_string(),
            rates: VehicleCategory::ALL.map(|category| category.default_rates()),
        }
    }
}

impl PricingConfig {
    pub fn rates_for(&self, category: VehicleCategory) -> RateCard {
        self.rates[category.comfort_rank()]
    }

    /// Every category needs strictly positive rates and a positive base fare.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if !(self.base_fare.is_finite() && self.base_fare > 0.0) {
            return Err(QuoteError::invalid("base fare must be positive"));
        }
        for category in VehicleCategory::ALL {
            let rates = self.rates_for(category);
            let positive = [rates.base_multiplier, rates.per_km, rates.per_minute]
                .iter()
                .all(|value| value.is_finite() && *value > 0.0);
            if !positive {
                return Err(QuoteError::invalid(format!(
                    "rates for {category:?} must be positive"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareBreakdown {
    pub category: VehicleCategory,
    pub comfort: String,
    pub base_fare: f64,
    pub distance_charge: f64,
    pub time_charge: f64,
    /// base_fare + distance_charge + time_charge
    pub subtotal: f64,
    pub surge_multiplier: f64,
    /// subtotal * surge_multiplier
    pub total: f64,
    pub currency: String,
    pub pricing_note: String,
}

impl FareBreakdown {
    /// Presentation copy with every amount rounded to 2 decimals.
    pub fn rounded(&self) -> FareBreakdown {
        FareBreakdown {
            base_fare: round_to(self.base_fare, 2),
            distance_charge: round_to(self.distance_charge, 2),
            time_charge: round_to(self.time_charge, 2),
            subtotal: round_to(self.subtotal, 2),
            total: round_to(self.total, 2),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FareCalculator {
    pricing: PricingConfig,
}

impl FareCalculator {
    pub fn new(pricing: PricingConfig) -> Result<Self, QuoteError> {
        pricing.validate()?;
        Ok(Self { pricing })
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    /// Price a trip. Negative distance or duration counts as zero; a
    /// non-positive surge is rejected.
    pub fn estimate_cost(
        &self,
        distance_km: f64,
        duration_minutes: f64,
        vehicle_type: &str,
        surge_multiplier: f64,
    ) -> Result<FareBreakdown, QuoteError> {
        if !distance_km.is_finite() || !duration_minutes.is_finite() {
            return Err(QuoteError::invalid("distance and duration must be finite"));
        }
        if !surge_multiplier.is_finite() || surge_multiplier <= 0.0 {
            return Err(QuoteError::invalid(format!(
                "surge multiplier must be positive, got {surge_multiplier}"
            )));
        }

        let category = VehicleCategory::from_label(vehicle_type);
        let rates = self.pricing.rates_for(category);

        let base_fare = self.pricing.base_fare * rates.base_multiplier;
        let distance_charge = distance_km.max(0.0) * rates.per_km;
        let time_charge = duration_minutes.max(0.0) * rates.per_minute;
        let subtotal = base_fare + distance_charge + time_charge;
        let total = subtotal * surge_multiplier;

        Ok(FareBreakdown {
            category,
            comfort: category.comfort_tier().to_string(),
            base_fare,
            distance_charge,
            time_charge,
            subtotal,
            surge_multiplier,
            total,
            currency: self.pricing.currency.clone(),
            pricing_note: format!(
                "{} vehicle - {currency} {}/km + {currency} {}/min",
                category.comfort_tier(),
                rates.per_km,
                rates.per_minute,
                currency = self.pricing.currency
            ),
        })
    }
}
