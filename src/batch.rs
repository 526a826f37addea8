// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Island City On a Wedge (ICOW) Cost Model - Batch Evaluation

//! Evaluate many lever tuples against one parameter set.
//!
//! Each tuple stands alone: a rejected tuple yields its error and the rest
//! of the batch carries on. Output order matches input order. With the
//! `threading` feature the tuples are spread over the rayon pool.

#[cfg(feature = "threading")]
use rayon::prelude::*;
use serde::Serialize;

use crate::city::characterize_city;
use crate::error::IcowError;
use crate::levers::Levers;
use crate::params::CityParams;
use crate::types::CityCharacteristics;

/// Result of one tuple in a batch.
#[derive(Debug)]
pub struct BatchOutcome {
    pub levers: Levers,
    pub result: Result<CityCharacteristics, IcowError>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Serializable view of a [`BatchOutcome`]: the record, or the error text.
#[derive(Debug, Serialize)]
pub struct BatchEntry<'a> {
    pub levers: &'a Levers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characteristics: Option<&'a CityCharacteristics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> From<&'a BatchOutcome> for BatchEntry<'a> {
    fn from(outcome: &'a BatchOutcome) -> Self {
        match &outcome.result {
            Ok(record) => Self { levers: &outcome.levers, characteristics: Some(record), error: None },
            Err(e) => Self { levers: &outcome.levers, characteristics: None, error: Some(e.to_string()) },
        }
    }
}

fn evaluate_one(levers: &Levers, params: &CityParams) -> BatchOutcome {
    BatchOutcome { levers: *levers, result: characterize_city(levers, params) }
}

/// Evaluate every tuple in `levers`.
pub fn evaluate_batch(levers: &[Levers], params: &CityParams) -> Vec<BatchOutcome> {
    #[cfg(feature = "threading")]
    {
        levers.par_iter().map(|l| evaluate_one(l, params)).collect()
    }
    #[cfg(not(feature = "threading"))]
    {
        levers.iter().map(|l| evaluate_one(l, params)).collect()
    }
}
