// Scenario Definitions: the eight reference lever sets plus one per remaining case
// Surge heights are carried for the damage driver; the cost model ignores them.

use icow_engine::Levers;

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub levers: Levers,
    pub surge_height: f64,
    /// Case the lever set must resolve to.
    pub expected_case: u8,
}

// Reference table order is (W, R, P, D, B); Levers::new takes (W, B, R, P, D).
fn reference(name: &'static str, label: &'static str, w: f64, r: f64, p: f64, d: f64, b: f64, surge: f64, case: u8) -> Scenario {
    Scenario {
        name,
        label,
        category: "reference",
        levers: Levers::new(w, b, r, p, d),
        surge_height: surge,
        expected_case: case,
    }
}

fn coverage(name: &'static str, label: &'static str, levers: Levers, case: u8) -> Scenario {
    Scenario { name, label, category: "coverage", levers, surge_height: 0.0, expected_case: case }
}

// ─── Scenario Table ─────────────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    vec![
        reference("zero_case", "Zero levers", 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9),
        reference("dike_only", "Dike only", 0.0, 0.0, 0.0, 5.0, 0.0, 3.0, 4),
        reference("full_protection", "Full protection", 2.0, 3.0, 0.8, 5.0, 1.0, 4.0, 2),
        // setback below minimum voids the resiliency height
        reference("resistance_only", "Resistance without setback", 0.0, 4.0, 0.5, 0.0, 0.0, 2.0, 9),
        reference("withdrawal_only", "Withdrawal only", 5.0, 0.0, 0.0, 0.0, 0.0, 3.0, 9),
        reference("edge_r_geq_b", "Resiliency above setback", 0.0, 6.0, 0.5, 3.0, 5.0, 4.0, 2),
        reference("high_surge", "Full protection, high surge", 2.0, 3.0, 0.8, 5.0, 1.0, 15.0, 2),
        reference("below_seawall", "Surge below seawall", 0.0, 0.0, 0.0, 0.0, 0.0, 1.5, 9),
        coverage("dike_setback_partial", "Dike, setback, partial resiliency", Levers::new(1.0, 4.0, 2.0, 0.6, 5.0), 1),
        coverage("dike_setback", "Dike with setback", Levers::new(0.0, 2.0, 0.0, 0.0, 5.0), 3),
        coverage("setback_partial", "Setback, partial resiliency", Levers::new(0.0, 4.0, 2.0, 0.6, 0.0), 5),
        coverage("setback_full", "Setback, full resiliency", Levers::new(0.0, 2.0, 3.0, 0.6, 0.0), 6),
        coverage("setback_only", "Setback only", Levers::new(0.0, 3.0, 0.0, 0.0, 0.0), 7),
        coverage("resiliency_only", "Resiliency only", Levers::new(0.0, 100.0, 4.0, 0.5, 100.0), 8),
        coverage("all_inactive", "All levers inactive", Levers::new(100.0, 100.0, 100.0, 0.5, 100.0), 9),
    ]
}
