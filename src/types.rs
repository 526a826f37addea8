// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Island City On a Wedge (ICOW) Cost Model - Type Definitions

use serde::{Deserialize, Serialize};

use crate::classify::CityCase;

// ─── City Characteristics ───────────────────────────────────────────────────

/// Full cost/value picture of the city for one lever configuration.
///
/// Zone 1 is the lowest band above the withdrawal line, zone 4 the band
/// reaching the top of the city. Bands absent from the case hold exactly 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCharacteristics {
    pub case: CityCase,

    // normalized heights
    pub withdrawal_height: f64,
    pub resiliency_height: f64,
    pub resistance_fraction: f64,
    pub dike_base_height: f64,
    pub dike_height: f64,
    /// Damage fraction still taken by the resilient zone.
    pub damage_to_resilient: f64,

    // zone values ($)
    pub zone1_value: f64,
    pub zone2_value: f64,
    pub zone3_value: f64,
    pub zone4_value: f64,

    // zone tops (m)
    pub zone1_top: f64,
    pub zone2_top: f64,
    pub zone3_top: f64,
    pub zone4_top: f64,

    pub fraction_withdrawn: f64,
    pub initial_value: f64,
    pub infrastructure_lost_to_withdrawal: f64,
    pub value_after_withdrawal: f64,
    /// Sum of the four zone values.
    pub final_value: f64,

    pub dike_cost: f64,
    pub withdrawal_cost: f64,
    pub resiliency_cost: f64,
    pub total_investment_cost: f64,
    /// Investment plus change in city value.
    pub total_cost: f64,
}

impl CityCharacteristics {
    pub fn zone_values(&self) -> [f64; 4] {
        [self.zone1_value, self.zone2_value, self.zone3_value, self.zone4_value]
    }

    pub fn zone_tops(&self) -> [f64; 4] {
        [self.zone1_top, self.zone2_top, self.zone3_top, self.zone4_top]
    }

    pub fn case_number(&self) -> u8 {
        self.case.number()
    }
}
