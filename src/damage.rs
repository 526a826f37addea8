// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Island City On a Wedge (ICOW) Cost Model - Surge Damage Contract
//
// The probabilistic damage model (breach probability, threshold damage,
// surge sequences) is owned by a collaborator. This module fixes only the
// shape of its inputs and outputs; the constants live in
// `params::SurgeDamageParams`.

use serde::{Deserialize, Serialize};

use crate::params::SurgeDamageParams;
use crate::types::CityCharacteristics;

/// Damage tallied for one surge event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageVector {
    /// Total damage cost ($).
    pub total: f64,
    /// Damage per zone, zone 1 first ($).
    pub zones: [f64; 4],
    /// Some damage occurred.
    pub flood_event: bool,
    /// The dike was breached.
    pub breach_event: bool,
    /// Damage crossed [`SurgeDamageParams::damage_threshold`].
    pub threshold_event: bool,
}

impl DamageVector {
    /// Check that the zone damages add up to the total.
    pub fn is_consistent(&self, tolerance: f64) -> bool {
        (self.zones.iter().sum::<f64>() - self.total).abs() <= tolerance
    }
}

/// A damage model evaluating one surge against a characterized city.
pub trait SurgeDamageModel {
    fn params(&self) -> &SurgeDamageParams;

    /// Damage from a surge of `surge_height` meters.
    fn damage(&self, city: &CityCharacteristics, surge_height: f64) -> DamageVector;

    /// Damage over a sequence of surges, one vector per surge.
    fn damage_sequence(&self, city: &CityCharacteristics, surges: &[f64]) -> Vec<DamageVector> {
        let limit = self.params().surge_sequence_length;
        surges.iter().take(limit).map(|&h| self.damage(city, h)).collect()
    }
}
