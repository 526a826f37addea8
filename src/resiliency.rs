// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Island City On a Wedge (ICOW) Cost Model - Resiliency

//! Cost of hardening the resilient zone against flooding.
//!
//! Both variants price the zone off the post-withdrawal city value, never
//! a single zone value.

use crate::levers::NormalizedLevers;
use crate::params::CityParams;

/// Resistance cost factor `fcR`.
///
/// Linear in `rp` up to the exponential threshold; above it an extra term
/// grows without bound as `rp -> 1`. Undefined at `rp = 1`.
pub fn resistance_cost_factor(resistance_fraction: f64, params: &CityParams) -> f64 {
    let rp = resistance_fraction;
    let exponential = params.resistance_exponential_factor
        * (rp - params.resistance_exponential_threshold).max(0.0)
        / (1.0 - rp);
    params.resistance_adjustment * (exponential + rp * params.resistance_linear_factor)
}

/// Resiliency zone below the dike base, leaving an unprotected
/// non-resilient band above it (`rh < dbh`, or no setback at all).
pub fn resiliency_cost_below_setback(
    levers: &NormalizedLevers,
    value_after_withdrawal: f64,
    params: &CityParams,
) -> f64 {
    let rh = levers.resiliency_height;
    let fcr = resistance_cost_factor(levers.resistance_fraction, params);
    value_after_withdrawal * fcr * rh * (rh / 2.0 + params.basement)
        / (params.building_height * (params.city_elevation_change - levers.withdrawal_height))
}

/// Resiliency zone reaching the dike base (`rh >= dbh`); the setback
/// height bears the cost.
pub fn resiliency_cost_to_setback(
    levers: &NormalizedLevers,
    value_after_withdrawal: f64,
    params: &CityParams,
) -> f64 {
    let rh = levers.resiliency_height;
    let dbh = levers.dike_base_height;
    let fcr = resistance_cost_factor(levers.resistance_fraction, params);
    value_after_withdrawal * fcr * dbh * (rh - dbh / 2.0 + params.basement)
        / (params.building_height * (params.city_elevation_change - levers.withdrawal_height))
}
