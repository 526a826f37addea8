// Scenario Report Types
// JSON for downstream analysis, key:value text for quick diffs

use icow_engine::adapter::CostLedger;
use icow_engine::{CityCharacteristics, CityParams, Levers};
use serde::Serialize;
use std::fmt::Write;

// ─── Single-Scenario Result ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub label: String,
    pub category: String,
    pub levers: Levers,
    pub surge_height: f64,
    pub expected_case: u8,
    pub pass: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characteristics: Option<CityCharacteristics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger: Option<CostLedger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ─── Sweep Summary ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SweepSummary {
    pub seed: u64,
    pub samples: usize,
    pub evaluated: usize,
    pub rejected: usize,
    /// Evaluated samples per case, case 1 first.
    pub case_counts: [usize; 9],
    pub ledger_total: CostLedger,
    /// Lowest total cost seen and its levers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cheapest: Option<(Levers, f64)>,
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub timestamp: String,
    pub version: &'static str,
    pub params: &'a CityParams,
    pub summary: Summary,
    pub scenarios: Vec<ScenarioResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep: Option<SweepSummary>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

// ─── Text Format ────────────────────────────────────────────────────────────

/// One block of `key: value` lines per scenario.
pub fn to_text(results: &[ScenarioResult]) -> String {
    let mut out = String::new();
    for r in results {
        let l = &r.levers;
        let _ = writeln!(out, "# Test Case: {}", r.name);
        let _ = writeln!(
            out,
            "# Levers: W={}, R={}, P={}, D={}, B={}",
            l.withdrawal, l.resiliency, l.resistance, l.dike, l.dike_base
        );
        match (&r.characteristics, &r.error) {
            (Some(c), _) => {
                let _ = writeln!(out, "case_number: {}", c.case_number());
                let _ = writeln!(out, "withdrawal_cost: {}", c.withdrawal_cost);
                let _ = writeln!(out, "value_after_withdrawal: {}", c.value_after_withdrawal);
                let _ = writeln!(out, "resistance_cost: {}", c.resiliency_cost);
                let _ = writeln!(out, "dike_cost: {}", c.dike_cost);
                let _ = writeln!(out, "total_investment_cost: {}", c.total_investment_cost);
                let _ = writeln!(out, "total_cost: {}", c.total_cost);
                for (i, v) in c.zone_values().iter().enumerate() {
                    let _ = writeln!(out, "zone{}_value: {}", i + 1, v);
                }
                for (i, t) in c.zone_tops().iter().enumerate() {
                    let _ = writeln!(out, "zone{}_top: {}", i + 1, t);
                }
            }
            (None, Some(e)) => {
                let _ = writeln!(out, "error: {}", e);
            }
            (None, None) => {}
        }
        out.push('\n');
    }
    out
}
