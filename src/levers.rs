// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Island City On a Wedge (ICOW) Cost Model - Policy Levers

use serde::{Deserialize, Serialize};

use crate::error::IcowError;
use crate::params::CityParams;

// ─── Raw levers ─────────────────────────────────────────────────────────────

/// The five policy choices for one evaluation, as supplied by the caller.
///
/// Any height lever set to [`CityParams::inactive_lever`] switches that
/// strategy off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Levers {
    /// W: height the city withdraws to (m).
    pub withdrawal: f64,
    /// B: dike base height, i.e. setback (m).
    pub dike_base: f64,
    /// R: resiliency height (m).
    pub resiliency: f64,
    /// P: resistance fraction of the resilient zone.
    pub resistance: f64,
    /// D: dike height (m).
    pub dike: f64,
}

impl Levers {
    /// Build from the conventional `(W, B, R, P, D)` order.
    pub fn new(withdrawal: f64, dike_base: f64, resiliency: f64, resistance: f64, dike: f64) -> Self {
        Self { withdrawal, dike_base, resiliency, resistance, dike }
    }

    /// Every strategy switched off.
    pub fn inactive(params: &CityParams) -> Self {
        let off = params.inactive_lever;
        Self::new(off, off, off, params.surge.resistance_base, off)
    }

    fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("withdrawal", self.withdrawal),
            ("dike_base", self.dike_base),
            ("resiliency", self.resiliency),
            ("resistance", self.resistance),
            ("dike", self.dike),
        ]
    }
}

// ─── Normalized levers ──────────────────────────────────────────────────────

/// Effective heights after sentinel and minimum-height handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLevers {
    /// wh
    pub withdrawal_height: f64,
    /// dbh
    pub dike_base_height: f64,
    /// rh
    pub resiliency_height: f64,
    /// rp
    pub resistance_fraction: f64,
    /// dh
    pub dike_height: f64,
}

impl NormalizedLevers {
    /// Fraction of damage the resilient zone still takes: `max(1 - rp, 0)`.
    pub fn damage_to_resilient(&self) -> f64 {
        (1.0 - self.resistance_fraction).max(0.0)
    }
}

/// Apply sentinel values and minimum thresholds.
///
/// A setback below the minimum height voids any resiliency height, and a
/// dike without a setback cannot carry a resiliency zone either.
pub fn normalize(levers: &Levers, params: &CityParams) -> NormalizedLevers {
    let off = params.inactive_lever;
    let min = params.min_height;

    let withdrawal_height = if levers.withdrawal == off { 0.0 } else { levers.withdrawal };

    let (mut resiliency_height, resistance_fraction) =
        if levers.resiliency == off || levers.resiliency < min {
            (0.0, params.surge.resistance_base)
        } else {
            (levers.resiliency, levers.resistance)
        };

    let dike_height = if levers.dike == off { 0.0 } else { levers.dike };

    let mut dike_base_height = if levers.dike_base < min {
        resiliency_height = 0.0;
        0.0
    } else if levers.dike_base == off {
        0.0
    } else {
        levers.dike_base
    };

    if dike_height >= min && dike_base_height < min && resiliency_height >= min {
        dike_base_height = 0.0;
        resiliency_height = 0.0;
    }

    NormalizedLevers {
        withdrawal_height,
        dike_base_height,
        resiliency_height,
        resistance_fraction,
        dike_height,
    }
}

/// Reject raw levers that no formula can evaluate, then normalize them.
pub fn validate(levers: &Levers, params: &CityParams) -> Result<NormalizedLevers, IcowError> {
    for (lever, value) in levers.named() {
        if !value.is_finite() {
            return Err(IcowError::NonFiniteLever { lever, value });
        }
        if lever != "resistance" && value < 0.0 {
            return Err(IcowError::NegativeHeight { lever, value });
        }
    }

    let normalized = normalize(levers, params);

    if normalized.withdrawal_height >= params.city_elevation_change {
        return Err(IcowError::WithdrawalAtCityTop {
            withdrawal: normalized.withdrawal_height,
            city_elevation: params.city_elevation_change,
        });
    }

    let rp = normalized.resistance_fraction;
    if normalized.resiliency_height > 0.0 && !(0.0..1.0).contains(&rp) {
        return Err(IcowError::ResistanceOutOfRange { value: rp });
    }

    Ok(normalized)
}
