// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Island City On a Wedge (ICOW) Cost Model - Dike Volume and Cost

//! Closed-form volume of a trapezoidal dike laid across a sloped wedge.
//!
//! The volume is the sum of a front prism, the straight wedge of the two
//! sides, and two tetrahedral corners. The corner term is the square root
//! of a degree-6 polynomial `T` in the cost height; `T` turns negative
//! outside the region where the geometric derivation holds, and there the
//! corner volume is taken as zero. That clamp is a modeling approximation,
//! not a geometric truth.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::params::CityParams;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Inputs of the dike cost formula other than the dike height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DikeGeometry {
    /// cd: cost per cubic meter.
    pub unit_cost: f64,
    /// S: ground slope.
    pub ground_slope: f64,
    /// W: city width the dike spans.
    pub city_width: f64,
    /// sd: slope of the dike sides.
    pub side_slope: f64,
    /// wdt: crest width.
    pub top_width: f64,
    /// ich: height equivalent of start-up costs.
    pub starting_cost_height: f64,
}

impl DikeGeometry {
    pub fn from_params(params: &CityParams) -> Self {
        Self {
            unit_cost: params.dike_unit_cost,
            ground_slope: params.city_slope(),
            city_width: params.city_width,
            side_slope: params.dike_side_slope,
            top_width: params.dike_top_width,
            starting_cost_height: params.dike_starting_cost_height,
        }
    }
}

/// Volume components of one dike (m^3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DikeVolume {
    /// Cost height: dike height plus the start-up height.
    pub cost_height: f64,
    /// Front of the dike across the city width.
    pub prism: f64,
    /// Straight part of the two sides running up the slope.
    pub wedge: f64,
    /// Tetrahedral corners; zero where the radicand is negative.
    pub corner: f64,
}

impl DikeVolume {
    pub fn total(&self) -> f64 {
        self.prism + self.wedge + self.corner
    }
}

// ---------------------------------------------------------------------------
// Formulas
// ---------------------------------------------------------------------------

/// Radicand `T` of the corner volume term.
pub fn corner_radicand(cost_height: f64, ground_slope: f64, side_slope: f64) -> f64 {
    let ch = cost_height;
    let s2 = ground_slope.powi(2);
    let s4 = ground_slope.powi(4);
    let sd2 = side_slope.powi(2);
    let rise = ch + 1.0 / side_slope;

    -ch.powi(4) * rise.powi(2) / sd2
        - 2.0 * ch.powi(5) * rise / s4
        - 4.0 * ch.powi(6) / (sd2 * s4)
        + 4.0 * ch.powi(4) * (2.0 * ch * rise - 3.0 * ch.powi(2) / sd2) / (sd2 * s2)
        + 2.0 * ch.powi(3) * rise / s2
}

/// Volume of a dike of height `height` (m).
pub fn dike_volume(height: f64, geometry: &DikeGeometry) -> DikeVolume {
    let ch = height + geometry.starting_cost_height;
    let g = geometry;

    let prism = g.city_width * ch * (g.top_width + ch / g.side_slope.powi(2));
    let wedge = g.top_width * ch.powi(2) / g.ground_slope.powi(2);

    let t = corner_radicand(ch, g.ground_slope, g.side_slope);
    let corner = if t >= 0.0 {
        t.sqrt() / 6.0
    } else {
        trace!(target: "icow.dike", cost_height = ch, radicand = t, "corner radicand clamped to zero");
        0.0
    };

    DikeVolume { cost_height: ch, prism, wedge, corner }
}

/// Construction cost of a dike of height `height`.
pub fn dike_cost(height: f64, geometry: &DikeGeometry) -> f64 {
    dike_volume(height, geometry).total() * geometry.unit_cost
}
