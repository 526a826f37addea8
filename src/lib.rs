// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Island City On a Wedge (ICOW) Cost Model

pub mod types;
pub mod error;
pub mod params;
pub mod levers;
pub mod dike;
pub mod withdrawal;
pub mod resiliency;
pub mod classify;
pub mod city;
pub mod batch;
pub mod damage;
pub mod adapter;

pub use types::*;
pub use city::{characterize_city, evaluate};
pub use classify::CityCase;
pub use error::{IcowError, ParamsError};
pub use levers::Levers;
pub use params::CityParams;

use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

/// JS handle on a parameter set.
#[wasm_bindgen]
pub struct IcowModel {
    params: CityParams,
}

#[wasm_bindgen]
impl IcowModel {
    /// Model with the published parameters.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        Self { params: CityParams::default() }
    }

    /// Model with parameters overridden from a JSON document.
    pub fn from_params_json(json: &str) -> Result<IcowModel, JsValue> {
        let params = CityParams::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { params })
    }

    /// Characterize the city for levers `(W, B, R, P, D)`.
    pub fn evaluate(&self, w: f64, b: f64, r: f64, p: f64, d: f64) -> Result<JsValue, JsValue> {
        let record = characterize_city(&Levers::new(w, b, r, p, d), &self.params)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&record).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn get_params(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.params).unwrap_or(JsValue::NULL)
    }

    pub fn city_elevation_change(&self) -> f64 {
        self.params.city_elevation_change
    }
}

impl Default for IcowModel {
    fn default() -> Self {
        Self::new()
    }
}

impl IcowModel {
    pub fn params(&self) -> &CityParams {
        &self.params
    }
}
