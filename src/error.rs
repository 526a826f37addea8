// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Island City On a Wedge (ICOW) Cost Model - Error Types

use thiserror::Error;

// ---------------------------------------------------------------------------
// Parameter errors
// ---------------------------------------------------------------------------

/// Errors raised when a [`CityParams`](crate::params::CityParams) set is unusable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("parameter `{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("parameter `{name}` must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("parameter `{name}` must lie in [0, 1], got {value}")]
    RatioOutOfRange { name: &'static str, value: f64 },
}

// ---------------------------------------------------------------------------
// Evaluation errors
// ---------------------------------------------------------------------------

/// Errors raised at the `evaluate` boundary. No partial record is ever
/// returned alongside one of these.
#[derive(Debug, Error)]
pub enum IcowError {
    #[error("lever `{lever}` must be finite, got {value}")]
    NonFiniteLever { lever: &'static str, value: f64 },

    #[error("lever `{lever}` is a height and cannot be negative, got {value}")]
    NegativeHeight { lever: &'static str, value: f64 },

    #[error("withdrawal height {withdrawal} must stay below the city elevation change {city_elevation}")]
    WithdrawalAtCityTop { withdrawal: f64, city_elevation: f64 },

    #[error("resistance fraction must lie in [0, 1) while resiliency is active, got {value}")]
    ResistanceOutOfRange { value: f64 },

    #[error("withdrawal, setback and dike stack to {top} m, above the city elevation change {city_elevation} m")]
    ProfileExceedsCity { top: f64, city_elevation: f64 },

    #[error("invalid city parameters: {0}")]
    InvalidParams(#[from] ParamsError),

    #[error("invalid parameter document: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("unknown city case number {0} (expected 1-9)")]
    UnknownCase(u8),
}
