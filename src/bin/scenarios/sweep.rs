// Seeded Random Lever Sweep
// Same seed, same samples: ChaCha8Rng keeps sweeps reproducible across platforms

use icow_engine::adapter::CostLedger;
use icow_engine::batch::evaluate_batch;
use icow_engine::{CityParams, Levers};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::report::SweepSummary;

/// Chance that any one lever is switched off with the sentinel value.
const INACTIVE_CHANCE: f64 = 0.1;

/// Lever samples spread over the lower half of the city profile.
pub struct LeverSampler {
    rng: ChaCha8Rng,
    inactive: f64,
    max_height: f64,
}

impl LeverSampler {
    pub fn new(seed: u64, params: &CityParams) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            inactive: params.inactive_lever,
            max_height: params.city_elevation_change / 2.0,
        }
    }

    fn height(&mut self) -> f64 {
        if self.rng.gen_bool(INACTIVE_CHANCE) {
            self.inactive
        } else {
            self.rng.gen_range(0.0..self.max_height)
        }
    }

    pub fn sample(&mut self) -> Levers {
        let withdrawal = self.height();
        let dike_base = self.height();
        let resiliency = self.height();
        let resistance = self.rng.gen_range(0.0..0.95);
        let dike = self.height();
        Levers::new(withdrawal, dike_base, resiliency, resistance, dike)
    }
}

/// Evaluate `samples` random lever sets and summarize them.
pub fn run_sweep(params: &CityParams, samples: usize, seed: u64) -> SweepSummary {
    let mut sampler = LeverSampler::new(seed, params);
    let levers: Vec<Levers> = (0..samples).map(|_| sampler.sample()).collect();
    let outcomes = evaluate_batch(&levers, params);

    let mut case_counts = [0usize; 9];
    let mut ledgers = Vec::with_capacity(outcomes.len());
    let mut cheapest: Option<(Levers, f64)> = None;

    for outcome in &outcomes {
        let Ok(record) = &outcome.result else { continue };
        case_counts[record.case_number() as usize - 1] += 1;
        ledgers.push(CostLedger::from_record(record));
        if cheapest.map_or(true, |(_, best)| record.total_cost < best) {
            cheapest = Some((outcome.levers, record.total_cost));
        }
    }

    let evaluated = ledgers.len();
    SweepSummary {
        seed,
        samples,
        evaluated,
        rejected: samples - evaluated,
        case_counts,
        ledger_total: CostLedger::sum(&ledgers),
        cheapest,
    }
}
