// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Island City On a Wedge (ICOW) Cost Model - City Characterization
//
// Normalizes the levers, classifies the city into one of nine cases and runs
// that case's formula block. Each block is a pure function of the normalized
// levers and the parameters; the orchestrator adds the withdrawal terms and
// the totals.

use tracing::{debug, warn};

use crate::classify::{classify, CityCase};
use crate::dike::{dike_cost, DikeGeometry};
use crate::error::IcowError;
use crate::levers::{validate, Levers, NormalizedLevers};
use crate::params::CityParams;
use crate::resiliency::{resiliency_cost_below_setback, resiliency_cost_to_setback};
use crate::types::CityCharacteristics;
use crate::withdrawal::{
    fraction_withdrawn, infrastructure_lost, value_after_withdrawal, withdrawal_cost,
};

// ---------------------------------------------------------------------------
// Case outcome
// ---------------------------------------------------------------------------

/// Fields populated by a single case formula block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaseOutcome {
    pub zone_values: [f64; 4],
    pub zone_tops: [f64; 4],
    pub dike_cost: f64,
    pub resiliency_cost: f64,
}

/// Shared inputs of the case formula blocks.
struct CaseInputs<'a> {
    levers: &'a NormalizedLevers,
    params: &'a CityParams,
    /// tcvaw
    value: f64,
}

impl CaseInputs<'_> {
    /// Value of a band `width` tall, weighted by `ratio`.
    fn band(&self, ratio: f64, width: f64) -> f64 {
        self.value * ratio * width / self.remaining_height()
    }

    /// Height of the city left after withdrawal, `CEC - wh`.
    fn remaining_height(&self) -> f64 {
        self.params.city_elevation_change - self.levers.withdrawal_height
    }

    fn dike_cost(&self) -> f64 {
        dike_cost(self.levers.dike_height, &DikeGeometry::from_params(self.params))
    }

    fn resiliency_below_setback(&self) -> f64 {
        resiliency_cost_below_setback(self.levers, self.value, self.params)
    }

    fn resiliency_to_setback(&self) -> f64 {
        resiliency_cost_to_setback(self.levers, self.value, self.params)
    }
}

// ---------------------------------------------------------------------------
// Formula blocks
// ---------------------------------------------------------------------------

fn dike_setback_partial_resiliency(c: &CaseInputs) -> CaseOutcome {
    let l = c.levers;
    let p = c.params;
    let (wh, rh, dbh, dh) = (l.withdrawal_height, l.resiliency_height, l.dike_base_height, l.dike_height);
    CaseOutcome {
        zone_values: [
            c.band(p.dike_unprotected_valuation_ratio, rh),
            c.band(p.dike_unprotected_valuation_ratio, dbh - rh),
            c.band(p.protected_value_ratio, dh),
            c.band(1.0, c.remaining_height() - dbh - dh),
        ],
        zone_tops: [wh + rh, wh + dbh, wh + dbh + dh, p.city_elevation_change],
        dike_cost: c.dike_cost(),
        resiliency_cost: c.resiliency_below_setback(),
    }
}

fn dike_setback_full_resiliency(c: &CaseInputs) -> CaseOutcome {
    let l = c.levers;
    let p = c.params;
    let (wh, dbh, dh) = (l.withdrawal_height, l.dike_base_height, l.dike_height);
    CaseOutcome {
        zone_values: [
            c.band(p.dike_unprotected_valuation_ratio, dbh),
            0.0,
            c.band(p.protected_value_ratio, dh),
            c.band(1.0, c.remaining_height() - dbh - dh),
        ],
        zone_tops: [wh + dbh, wh + dbh, wh + dbh + dh, p.city_elevation_change],
        dike_cost: c.dike_cost(),
        resiliency_cost: c.resiliency_to_setback(),
    }
}

fn dike_setback(c: &CaseInputs) -> CaseOutcome {
    let l = c.levers;
    let p = c.params;
    let (wh, dbh, dh) = (l.withdrawal_height, l.dike_base_height, l.dike_height);
    CaseOutcome {
        zone_values: [
            0.0,
            c.band(p.dike_unprotected_valuation_ratio, dbh),
            c.band(p.protected_value_ratio, dh),
            c.band(1.0, c.remaining_height() - dbh - dh),
        ],
        zone_tops: [wh, wh + dbh, wh + dbh + dh, p.city_elevation_change],
        dike_cost: c.dike_cost(),
        resiliency_cost: 0.0,
    }
}

fn dike_only(c: &CaseInputs) -> CaseOutcome {
    let l = c.levers;
    let p = c.params;
    let (wh, dh) = (l.withdrawal_height, l.dike_height);
    CaseOutcome {
        zone_values: [
            0.0,
            0.0,
            c.band(p.protected_value_ratio, dh),
            c.band(1.0, c.remaining_height() - dh),
        ],
        zone_tops: [wh, wh, wh + dh, p.city_elevation_change],
        dike_cost: c.dike_cost(),
        resiliency_cost: 0.0,
    }
}

// The setback still sits on a dike foundation, so cases 5 and 7 pay the
// start-up cost of a zero-height dike.
fn setback_partial_resiliency(c: &CaseInputs) -> CaseOutcome {
    let l = c.levers;
    let p = c.params;
    let (wh, rh, dbh) = (l.withdrawal_height, l.resiliency_height, l.dike_base_height);
    CaseOutcome {
        zone_values: [
            c.band(p.dike_unprotected_valuation_ratio, rh),
            c.band(p.dike_unprotected_valuation_ratio, dbh - rh),
            0.0,
            c.band(1.0, c.remaining_height() - dbh),
        ],
        zone_tops: [wh + rh, wh + dbh, wh + dbh, p.city_elevation_change],
        dike_cost: c.dike_cost(),
        resiliency_cost: c.resiliency_below_setback(),
    }
}

fn setback_full_resiliency(c: &CaseInputs) -> CaseOutcome {
    let l = c.levers;
    let p = c.params;
    let (wh, dbh) = (l.withdrawal_height, l.dike_base_height);
    CaseOutcome {
        zone_values: [
            c.band(p.dike_unprotected_valuation_ratio, dbh),
            0.0,
            0.0,
            c.band(1.0, c.remaining_height() - dbh),
        ],
        zone_tops: [wh + dbh, wh + dbh, wh + dbh, p.city_elevation_change],
        dike_cost: 0.0,
        resiliency_cost: c.resiliency_to_setback(),
    }
}

fn setback_only(c: &CaseInputs) -> CaseOutcome {
    let l = c.levers;
    let p = c.params;
    let (wh, dbh) = (l.withdrawal_height, l.dike_base_height);
    CaseOutcome {
        zone_values: [
            0.0,
            c.band(p.dike_unprotected_valuation_ratio, dbh),
            0.0,
            c.band(1.0, c.remaining_height() - dbh),
        ],
        zone_tops: [wh, wh + dbh, wh + dbh, p.city_elevation_change],
        dike_cost: c.dike_cost(),
        resiliency_cost: 0.0,
    }
}

fn resiliency_only(c: &CaseInputs) -> CaseOutcome {
    let l = c.levers;
    let p = c.params;
    let (wh, rh) = (l.withdrawal_height, l.resiliency_height);
    CaseOutcome {
        zone_values: [c.band(1.0, rh), 0.0, 0.0, c.band(1.0, c.remaining_height() - rh)],
        zone_tops: [wh + rh, wh + rh, wh + rh, p.city_elevation_change],
        dike_cost: 0.0,
        resiliency_cost: c.resiliency_below_setback(),
    }
}

fn unprotected(c: &CaseInputs) -> CaseOutcome {
    let wh = c.levers.withdrawal_height;
    CaseOutcome {
        zone_values: [0.0, 0.0, 0.0, c.value],
        zone_tops: [wh, wh, wh, c.params.city_elevation_change],
        dike_cost: 0.0,
        resiliency_cost: 0.0,
    }
}

/// Run the formula block of `case`.
pub fn evaluate_case(
    case: CityCase,
    levers: &NormalizedLevers,
    value_after_withdrawal: f64,
    params: &CityParams,
) -> CaseOutcome {
    let inputs = CaseInputs { levers, params, value: value_after_withdrawal };
    match case {
        CityCase::DikeSetbackPartialResiliency => dike_setback_partial_resiliency(&inputs),
        CityCase::DikeSetbackFullResiliency => dike_setback_full_resiliency(&inputs),
        CityCase::DikeSetback => dike_setback(&inputs),
        CityCase::DikeOnly => dike_only(&inputs),
        CityCase::SetbackPartialResiliency => setback_partial_resiliency(&inputs),
        CityCase::SetbackFullResiliency => setback_full_resiliency(&inputs),
        CityCase::SetbackOnly => setback_only(&inputs),
        CityCase::ResiliencyOnly => resiliency_only(&inputs),
        CityCase::Unprotected => unprotected(&inputs),
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Characterize the city for one lever configuration.
pub fn characterize_city(levers: &Levers, params: &CityParams) -> Result<CityCharacteristics, IcowError> {
    params.validate().map_err(|e| {
        warn!(target: "icow.levers", error = %e, "parameter set rejected");
        e
    })?;

    let normalized = validate(levers, params).map_err(|e| {
        warn!(target: "icow.levers", ?levers, error = %e, "lever configuration rejected");
        e
    })?;

    let case = classify(&normalized);

    let initial_value = params.total_city_value;
    let wh = normalized.withdrawal_height;
    let wc = withdrawal_cost(wh, initial_value, params);
    let fw = fraction_withdrawn(wh, params);
    let ilfw = infrastructure_lost(fw, initial_value, params);
    let tcvaw = value_after_withdrawal(wh, initial_value, params);

    let outcome = evaluate_case(case, &normalized, tcvaw, params);

    let top = outcome.zone_tops[2];
    if top > params.city_elevation_change {
        warn!(target: "icow.levers", ?levers, top, "lever configuration rejected");
        return Err(IcowError::ProfileExceedsCity { top, city_elevation: params.city_elevation_change });
    }

    let resilient_top = normalized.withdrawal_height + normalized.resiliency_height;
    if case.has_resiliency() && resilient_top > params.city_elevation_change {
        warn!(
            target: "icow.city",
            case = case.number(),
            resilient_top,
            "resiliency height runs past the city top; cost charged on the full height"
        );
    }

    let [vz1, vz2, vz3, vz4] = outcome.zone_values;
    let [tz1, tz2, tz3, tz4] = outcome.zone_tops;
    let fcv = vz1 + vz2 + vz3 + vz4;
    let tic = wc + outcome.dike_cost + outcome.resiliency_cost;
    let tc = match case {
        CityCase::Unprotected => initial_value - fcv,
        _ => tic + fcv - initial_value,
    };

    debug!(target: "icow.city", case = case.number(), tic, tc, "city characterized");

    Ok(CityCharacteristics {
        case,
        withdrawal_height: wh,
        resiliency_height: normalized.resiliency_height,
        resistance_fraction: normalized.resistance_fraction,
        dike_base_height: normalized.dike_base_height,
        dike_height: normalized.dike_height,
        damage_to_resilient: normalized.damage_to_resilient(),
        zone1_value: vz1,
        zone2_value: vz2,
        zone3_value: vz3,
        zone4_value: vz4,
        zone1_top: tz1,
        zone2_top: tz2,
        zone3_top: tz3,
        zone4_top: tz4,
        fraction_withdrawn: fw,
        initial_value,
        infrastructure_lost_to_withdrawal: ilfw,
        value_after_withdrawal: tcvaw,
        final_value: fcv,
        dike_cost: outcome.dike_cost,
        withdrawal_cost: wc,
        resiliency_cost: outcome.resiliency_cost,
        total_investment_cost: tic,
        total_cost: tc,
    })
}

/// `evaluate(W, B, R, P, D)` with the published parameter set.
pub fn evaluate(w: f64, b: f64, r: f64, p: f64, d: f64) -> Result<CityCharacteristics, IcowError> {
    characterize_city(&Levers::new(w, b, r, p, d), &CityParams::default())
}
