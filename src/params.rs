// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Island City On a Wedge (ICOW) Cost Model - City Parameters

//! Physical and economic constants of the modeled city.
//!
//! Defaults reproduce the published parameter set (Ceres, Forest, Keller,
//! 2019). Every value can be overridden from a JSON document; keys that are
//! absent keep their default.

use serde::{Deserialize, Serialize};

use crate::error::{IcowError, ParamsError};

// ---------------------------------------------------------------------------
// Published defaults
// ---------------------------------------------------------------------------

/// Initial total city value in dollars.
pub const DEFAULT_TOTAL_CITY_VALUE: f64 = 1_500_000_000_000.0;

/// Lever value meaning "this strategy is not in play".
pub const INACTIVE_LEVER: f64 = 100.0;

/// Divisor of the initial city value that marks unacceptable damage.
const DAMAGE_THRESHOLD_DIVISOR: f64 = 375.0;

// ---------------------------------------------------------------------------
// CityParams
// ---------------------------------------------------------------------------

/// Every constant the cost model reads. Plain data, `Send + Sync`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityParams {
    /// Total city elevation change, CEC (m).
    pub city_elevation_change: f64,
    /// City width along the coast (m).
    pub city_width: f64,
    /// City length inland (m).
    pub city_length: f64,
    /// Initial total city value ($).
    pub total_city_value: f64,
    /// Fraction of value lost per unit of withdrawn fraction.
    pub withdrawal_percent_lost: f64,
    /// Building height used by the resiliency cost (m).
    pub building_height: f64,
    /// Valuation ratio of the band protected by the dike.
    pub protected_value_ratio: f64,
    /// Side slope of the dike.
    pub dike_side_slope: f64,
    /// Valuation ratio of bands seaward of the dike.
    pub dike_unprotected_valuation_ratio: f64,
    /// Dike crest width (m).
    pub dike_top_width: f64,
    /// Equivalent height standing in for dike start-up costs (m).
    pub dike_starting_cost_height: f64,
    /// Dike construction cost per cubic meter ($/m^3).
    pub dike_unit_cost: f64,
    pub withdrawal_cost_factor: f64,
    pub resistance_exponential_factor: f64,
    pub resistance_linear_factor: f64,
    /// Resistance fraction above which the exponential term kicks in.
    pub resistance_exponential_threshold: f64,
    pub resistance_adjustment: f64,
    /// Basement depth (m).
    pub basement: f64,
    /// Heights below this are treated as absent (m).
    pub min_height: f64,
    /// Sentinel lever value for an inactive strategy.
    pub inactive_lever: f64,
    /// Constants of the surge damage subsystem.
    pub surge: SurgeDamageParams,
}

impl Default for CityParams {
    fn default() -> Self {
        Self {
            city_elevation_change: 17.0,
            city_width: 43_000.0,
            city_length: 2_000.0,
            total_city_value: DEFAULT_TOTAL_CITY_VALUE,
            withdrawal_percent_lost: 0.01,
            building_height: 30.0,
            protected_value_ratio: 1.1,
            dike_side_slope: 0.5,
            dike_unprotected_valuation_ratio: 0.95,
            dike_top_width: 3.0,
            dike_starting_cost_height: 2.0,
            dike_unit_cost: 10.0,
            withdrawal_cost_factor: 1.0,
            resistance_exponential_factor: 0.115,
            resistance_linear_factor: 0.35,
            resistance_exponential_threshold: 0.4,
            resistance_adjustment: 1.25,
            basement: 3.0,
            min_height: 0.1,
            inactive_lever: INACTIVE_LEVER,
            surge: SurgeDamageParams::default(),
        }
    }
}

impl CityParams {
    /// Load a parameter set from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, IcowError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Ground slope of the wedge: width over length (21.5 by default).
    pub fn city_slope(&self) -> f64 {
        self.city_width / self.city_length
    }

    /// Reject parameter sets the closed-form formulas cannot evaluate.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let positive = [
            ("city_elevation_change", self.city_elevation_change),
            ("city_width", self.city_width),
            ("city_length", self.city_length),
            ("total_city_value", self.total_city_value),
            ("building_height", self.building_height),
            ("dike_side_slope", self.dike_side_slope),
            ("dike_unit_cost", self.dike_unit_cost),
            ("min_height", self.min_height),
        ];
        for (name, value) in positive {
            check_finite(name, value)?;
            if value <= 0.0 {
                return Err(ParamsError::NonPositive { name, value });
            }
        }

        let non_negative = [
            ("protected_value_ratio", self.protected_value_ratio),
            ("dike_unprotected_valuation_ratio", self.dike_unprotected_valuation_ratio),
            ("dike_top_width", self.dike_top_width),
            ("dike_starting_cost_height", self.dike_starting_cost_height),
            ("withdrawal_cost_factor", self.withdrawal_cost_factor),
            ("resistance_exponential_factor", self.resistance_exponential_factor),
            ("resistance_linear_factor", self.resistance_linear_factor),
            ("resistance_adjustment", self.resistance_adjustment),
            ("basement", self.basement),
        ];
        for (name, value) in non_negative {
            check_finite(name, value)?;
            if value < 0.0 {
                return Err(ParamsError::NonPositive { name, value });
            }
        }

        let ratios = [
            ("withdrawal_percent_lost", self.withdrawal_percent_lost),
            ("resistance_exponential_threshold", self.resistance_exponential_threshold),
        ];
        for (name, value) in ratios {
            check_finite(name, value)?;
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamsError::RatioOutOfRange { name, value });
            }
        }

        check_finite("inactive_lever", self.inactive_lever)
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), ParamsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParamsError::NonFinite { name, value })
    }
}

// ---------------------------------------------------------------------------
// SurgeDamageParams
// ---------------------------------------------------------------------------

/// Constants of the probabilistic surge damage subsystem.
///
/// Declared alongside the cost model but consumed only by an external
/// [`SurgeDamageModel`](crate::damage::SurgeDamageModel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurgeDamageParams {
    pub damage_factor: f64,
    /// Extra damage multiplier when the dike fails.
    pub failed_dike_damage_factor: f64,
    pub intact_dike_damage_factor: f64,
    /// Fraction of dike height above which breach probability saturates.
    pub breach_probability_threshold: f64,
    pub breach_probability_base: f64,
    /// Damage ($) considered unacceptable in a single event.
    pub damage_threshold: f64,
    /// 0 keeps the normal rate above threshold, 1 doubles it.
    pub threshold_damage_fraction: f64,
    pub threshold_damage_exponent: f64,
    pub surge_sequence_length: usize,
    pub max_surge_block: usize,
    pub resistance_base: f64,
    /// Seawall height (m).
    pub seawall: f64,
    /// Wave run-up multiplier; 1.0 adds nothing.
    pub run_up_wave: f64,
}

impl Default for SurgeDamageParams {
    fn default() -> Self {
        Self {
            damage_factor: 0.39,
            failed_dike_damage_factor: 1.5,
            intact_dike_damage_factor: 0.03,
            breach_probability_threshold: 0.95,
            breach_probability_base: 0.05,
            damage_threshold: DEFAULT_TOTAL_CITY_VALUE / DAMAGE_THRESHOLD_DIVISOR,
            threshold_damage_fraction: 1.0,
            threshold_damage_exponent: 1.01,
            surge_sequence_length: 200,
            max_surge_block: 5000,
            resistance_base: 0.5,
            seawall: 1.75,
            run_up_wave: 1.1,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
