// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Island City On a Wedge (ICOW) Cost Model - City Case Classification

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::IcowError;
use crate::levers::NormalizedLevers;

// ---------------------------------------------------------------------------
// CityCase
// ---------------------------------------------------------------------------

/// The nine mutually exclusive geometric configurations of active levers.
///
/// Serialized as its case number (1-9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CityCase {
    /// 1: dike, setback and resiliency below the setback.
    DikeSetbackPartialResiliency,
    /// 2: dike, setback and resiliency covering the setback.
    DikeSetbackFullResiliency,
    /// 3: dike and setback, no resiliency.
    DikeSetback,
    /// 4: dike at the seawall, no setback.
    DikeOnly,
    /// 5: setback and resiliency below it, no dike.
    SetbackPartialResiliency,
    /// 6: setback fully covered by resiliency, no dike.
    SetbackFullResiliency,
    /// 7: setback only.
    SetbackOnly,
    /// 8: resiliency only.
    ResiliencyOnly,
    /// 9: no intervention.
    Unprotected,
}

impl CityCase {
    pub const ALL: [CityCase; 9] = [
        Self::DikeSetbackPartialResiliency,
        Self::DikeSetbackFullResiliency,
        Self::DikeSetback,
        Self::DikeOnly,
        Self::SetbackPartialResiliency,
        Self::SetbackFullResiliency,
        Self::SetbackOnly,
        Self::ResiliencyOnly,
        Self::Unprotected,
    ];

    /// Case number, 1 through 9.
    pub fn number(&self) -> u8 {
        match self {
            Self::DikeSetbackPartialResiliency => 1,
            Self::DikeSetbackFullResiliency => 2,
            Self::DikeSetback => 3,
            Self::DikeOnly => 4,
            Self::SetbackPartialResiliency => 5,
            Self::SetbackFullResiliency => 6,
            Self::SetbackOnly => 7,
            Self::ResiliencyOnly => 8,
            Self::Unprotected => 9,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::DikeSetbackPartialResiliency => {
                "Dike with setback; resiliency below the setback leaves an unprotected band"
            }
            Self::DikeSetbackFullResiliency => "Dike with setback; resiliency covers the setback",
            Self::DikeSetback => "Dike with setback, no resiliency",
            Self::DikeOnly => "Dike at the seawall, no setback",
            Self::SetbackPartialResiliency => "Setback without dike; resiliency below the setback",
            Self::SetbackFullResiliency => "Setback without dike; resiliency covers the setback",
            Self::SetbackOnly => "Setback only",
            Self::ResiliencyOnly => "Resiliency only",
            Self::Unprotected => "No intervention",
        }
    }

    pub fn has_dike(&self) -> bool {
        matches!(
            self,
            Self::DikeSetbackPartialResiliency
                | Self::DikeSetbackFullResiliency
                | Self::DikeSetback
                | Self::DikeOnly
        )
    }

    pub fn has_resiliency(&self) -> bool {
        matches!(
            self,
            Self::DikeSetbackPartialResiliency
                | Self::DikeSetbackFullResiliency
                | Self::SetbackPartialResiliency
                | Self::SetbackFullResiliency
                | Self::ResiliencyOnly
        )
    }
}

impl From<CityCase> for u8 {
    fn from(case: CityCase) -> u8 {
        case.number()
    }
}

impl TryFrom<u8> for CityCase {
    type Error = IcowError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        n.checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize).copied())
            .ok_or(IcowError::UnknownCase(n))
    }
}

impl std::fmt::Display for CityCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "case {}", self.number())
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Select the case for normalized levers. Total over every input.
pub fn classify(levers: &NormalizedLevers) -> CityCase {
    let dike = levers.dike_height > 0.0;
    let setback = levers.dike_base_height > 0.0;
    let resilient = levers.resiliency_height > 0.0;
    let below_setback = levers.resiliency_height < levers.dike_base_height;

    let case = match (dike, setback, resilient) {
        (true, true, true) if below_setback => CityCase::DikeSetbackPartialResiliency,
        (true, true, true) => CityCase::DikeSetbackFullResiliency,
        (true, true, false) => CityCase::DikeSetback,
        (true, false, _) => CityCase::DikeOnly,
        (false, true, true) if below_setback => CityCase::SetbackPartialResiliency,
        (false, true, true) => CityCase::SetbackFullResiliency,
        (false, true, false) => CityCase::SetbackOnly,
        (false, false, true) => CityCase::ResiliencyOnly,
        (false, false, false) => CityCase::Unprotected,
    };

    debug!(
        target: "icow.classify",
        case = case.number(),
        wh = levers.withdrawal_height,
        dbh = levers.dike_base_height,
        rh = levers.resiliency_height,
        dh = levers.dike_height,
        "city classified"
    );
    case
}
