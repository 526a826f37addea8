// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Island City On a Wedge (ICOW) Cost Model - Withdrawal

//! Costs and value changes from withdrawing the city inland.
//!
//! Every divide here is by `CEC - wh`; callers guarantee `wh < CEC`
//! (enforced by [`levers::validate`](crate::levers::validate)).

use crate::params::CityParams;

/// Cost of relocating the value below the withdrawal height.
///
/// Zero when nothing is withdrawn.
pub fn withdrawal_cost(withdrawal_height: f64, initial_value: f64, params: &CityParams) -> f64 {
    if withdrawal_height == 0.0 {
        return 0.0;
    }
    initial_value * withdrawal_height / (params.city_elevation_change - withdrawal_height)
        * params.withdrawal_cost_factor
}

/// Fraction of the city profile that is withdrawn.
pub fn fraction_withdrawn(withdrawal_height: f64, params: &CityParams) -> f64 {
    withdrawal_height / params.city_elevation_change
}

/// Infrastructure value written off by withdrawing.
pub fn infrastructure_lost(fraction_withdrawn: f64, initial_value: f64, params: &CityParams) -> f64 {
    initial_value * fraction_withdrawn * params.withdrawal_percent_lost
}

/// Total city value after withdrawal (Equation 2):
/// `V_w = V_city * (1 - f_l * W / CEC)`.
pub fn value_after_withdrawal(withdrawal_height: f64, initial_value: f64, params: &CityParams) -> f64 {
    initial_value
        * (1.0 - params.withdrawal_percent_lost * withdrawal_height / params.city_elevation_change)
}

/// Abatement total: dike + withdrawal + value lost to withdrawal + resiliency.
pub fn total_abatement_cost(dike: f64, withdrawal: f64, lost_to_withdrawal: f64, resiliency: f64) -> f64 {
    dike + withdrawal + lost_to_withdrawal + resiliency
}
