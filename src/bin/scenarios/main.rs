// ICOW Scenario Runner: evaluates named lever sets and optional random sweeps
//
// Usage:
//   cargo run --release --bin scenarios                        # All named scenarios
//   cargo run --release --bin scenarios -- full_protection     # Filter by name
//   cargo run --release --bin scenarios -- --params city.json  # Override parameters
//   cargo run --release --bin scenarios -- --sample 10000 --seed 42
//   cargo run --release --bin scenarios -- --format text       # key: value output

mod report;
mod scenarios;
mod sweep;

use icow_engine::adapter::CostLedger;
use icow_engine::{characterize_city, CityParams};
use report::*;
use scenarios::*;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

#[derive(PartialEq)]
enum Format {
    Json,
    Text,
}

struct CliArgs {
    params: Option<String>,
    sample: usize,
    seed: u64,
    format: Format,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        params: None,
        sample: 0,
        seed: 0,
        format: Format::Json,
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--params" => {
                i += 1;
                cli.params = args.get(i).cloned();
            }
            "--sample" => {
                i += 1;
                if i < args.len() {
                    cli.sample = args[i].parse().unwrap_or(0);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--format" => {
                i += 1;
                cli.format = match args.get(i).map(String::as_str) {
                    Some("text") => Format::Text,
                    _ => Format::Json,
                };
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

fn load_params(path: Option<&str>) -> Result<CityParams, String> {
    let Some(path) = path else {
        return Ok(CityParams::default());
    };
    let json = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    CityParams::from_json(&json).map_err(|e| format!("{}: {}", path, e))
}

fn run_scenario(scenario: &Scenario, params: &CityParams) -> ScenarioResult {
    let (characteristics, error) = match characterize_city(&scenario.levers, params) {
        Ok(c) => (Some(c), None),
        Err(e) => (None, Some(e.to_string())),
    };
    let pass = characteristics
        .as_ref()
        .is_some_and(|c| c.case_number() == scenario.expected_case);

    ScenarioResult {
        name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        category: scenario.category.to_string(),
        levers: scenario.levers,
        surge_height: scenario.surge_height,
        expected_case: scenario.expected_case,
        pass,
        ledger: characteristics.as_ref().map(CostLedger::from_record),
        characteristics,
        error,
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = parse_args();

    let params = match load_params(cli.params.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to load parameters: {}", e);
            std::process::exit(2);
        }
    };

    let all_scenarios = scenarios();
    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios.iter()
                .filter(|s| s.name.to_lowercase().contains(&f_lower)
                          || s.label.to_lowercase().contains(&f_lower)
                          || s.category.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() && cli.sample == 0 {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    let suite_start = Instant::now();
    let results: Vec<ScenarioResult> = to_run.iter().map(|s| run_scenario(s, &params)).collect();

    if cli.format == Format::Text {
        print!("{}", to_text(&results));
    } else {
        println!("\n  ICOW Scenario Runner v0.2.0");
        println!("  CEC: {} m | City value: {:.3e} | Scenarios: {}\n",
            params.city_elevation_change, params.total_city_value, results.len());
        println!("  {:<24} {:>5} {:>14} {:>14} {:>14} {:>14}  ",
            "Scenario", "Case", "Withdrawal", "Dike", "Resiliency", "Net cost");
        println!("  {}", "-".repeat(96));
        for r in &results {
            match &r.characteristics {
                Some(c) => println!("  {:<24} {:>5} {:>14.4e} {:>14.4e} {:>14.4e} {:>14.4e}  {}",
                    r.name, c.case_number(), c.withdrawal_cost, c.dike_cost,
                    c.resiliency_cost, c.total_cost,
                    if r.pass { "PASS" } else { "FAIL" }),
                None => println!("  {:<24} {:>5}  REJECTED: {}",
                    r.name, "-", r.error.as_deref().unwrap_or("unknown error")),
            }
        }
    }

    let sweep = if cli.sample > 0 {
        let summary = sweep::run_sweep(&params, cli.sample, cli.seed);
        eprintln!("  Sweep: {} samples (seed {}), {} evaluated, {} rejected",
            summary.samples, summary.seed, summary.evaluated, summary.rejected);
        Some(summary)
    } else {
        None
    };

    let total = results.len();
    let passed = results.iter().filter(|r| r.pass).count();
    let failed = total - passed;
    eprintln!("  Total: {}  Passed: {}  Failed: {}  Time: {:.1}ms",
        total, passed, failed, suite_start.elapsed().as_secs_f64() * 1000.0);

    if cli.format == Format::Json {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let timestamp = format!("{}", ts);

        let report = RunReport {
            timestamp: timestamp.clone(),
            version: "0.2.0",
            params: &params,
            summary: Summary { total, passed, failed },
            scenarios: results,
            sweep,
        };

        let dir = std::path::Path::new("icow-results");
        let path = dir.join(format!("scenarios-{}.json", timestamp));
        let written = std::fs::create_dir_all(dir)
            .map_err(|e| e.to_string())
            .and_then(|_| serde_json::to_string_pretty(&report).map_err(|e| e.to_string()))
            .and_then(|json| std::fs::write(&path, json).map_err(|e| e.to_string()));
        match written {
            Ok(()) => println!("\n  Results saved to: {}\n", path.display()),
            Err(e) => {
                eprintln!("Failed to write report: {}", e);
                std::process::exit(2);
            }
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}
