//! Adapter layer: converts the model's f64 costs into a Decimal dollar ledger.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::CityCharacteristics;
use crate::withdrawal::total_abatement_cost;

/// Convert f64 to Decimal (lossy but sufficient for reporting).
pub fn to_decimal(v: f64) -> Decimal {
    Decimal::from_f64(v).unwrap_or(Decimal::ZERO)
}

/// Round a dollar amount to whole cents, half away from zero.
pub fn to_cents(v: f64) -> Decimal {
    to_decimal(v).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Cost fields of one record in dollars and cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLedger {
    pub withdrawal: Decimal,
    pub dike: Decimal,
    pub resiliency: Decimal,
    /// Sum of the three rounded investment lines.
    pub total_investment: Decimal,
    /// Investment plus the infrastructure written off by withdrawing.
    pub abatement: Decimal,
    pub value_after_withdrawal: Decimal,
    pub total_cost: Decimal,
}

impl CostLedger {
    pub fn from_record(record: &CityCharacteristics) -> Self {
        let withdrawal = to_cents(record.withdrawal_cost);
        let dike = to_cents(record.dike_cost);
        let resiliency = to_cents(record.resiliency_cost);
        Self {
            withdrawal,
            dike,
            resiliency,
            total_investment: withdrawal + dike + resiliency,
            abatement: to_cents(total_abatement_cost(
                record.dike_cost,
                record.withdrawal_cost,
                record.infrastructure_lost_to_withdrawal,
                record.resiliency_cost,
            )),
            value_after_withdrawal: to_cents(record.value_after_withdrawal),
            total_cost: to_cents(record.total_cost),
        }
    }

    /// Line-by-line sum of several ledgers, e.g. across a sweep.
    pub fn sum<'a>(ledgers: impl IntoIterator<Item = &'a CostLedger>) -> CostLedger {
        ledgers.into_iter().fold(CostLedger::zero(), |acc, l| CostLedger {
            withdrawal: acc.withdrawal + l.withdrawal,
            dike: acc.dike + l.dike,
            resiliency: acc.resiliency + l.resiliency,
            total_investment: acc.total_investment + l.total_investment,
            abatement: acc.abatement + l.abatement,
            value_after_withdrawal: acc.value_after_withdrawal + l.value_after_withdrawal,
            total_cost: acc.total_cost + l.total_cost,
        })
    }

    pub fn zero() -> Self {
        Self {
            withdrawal: Decimal::ZERO,
            dike: Decimal::ZERO,
            resiliency: Decimal::ZERO,
            total_investment: Decimal::ZERO,
            abatement: Decimal::ZERO,
            value_after_withdrawal: Decimal::ZERO,
            total_cost: Decimal::ZERO,
        }
    }
}
