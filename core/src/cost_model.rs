//! Per-period cost model.
//!
//! Savings are measured against a baseline where every dollar of volume,
//! on either rail, pays the card rate. Card volume instead pays the
//! convenience fee; debit volume instead pays a flat per-transaction fee.

use crate::period::PeriodRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodCosts {
    /// Cost if all volume had gone through the card rail at the baseline
    /// rate. Reported only; not part of the savings figure.
    pub potential_card_cost: f64,
    pub actual_card_cost:    f64,
    pub debit_rail_cost:     f64,
    pub card_fee_savings:    f64,
    pub debit_rail_savings:  f64,
}

impl PeriodCosts {
    pub fn compute(period: &PeriodRecord, debit_cost_per_transaction: f64) -> Self {
        let baseline_rate = period.card_rate_percent / 100.0;

        let potential_card_cost = period.total_volume() * baseline_rate;
        let actual_card_cost = period.card_volume * (period.convenience_fee_percent / 100.0);
        let debit_rail_cost = period.debit_count as f64 * debit_cost_per_transaction;

        let card_fee_savings = period.card_volume * baseline_rate - actual_card_cost;
        let debit_rail_savings = period.debit_volume * baseline_rate - debit_rail_cost;

        Self {
            potential_card_cost,
            actual_card_cost,
            debit_rail_cost,
            card_fee_savings,
            debit_rail_savings,
        }
    }

    /// Savings realised this period. May be negative.
    pub fn period_savings(&self) -> f64 {
        self.card_fee_savings + self.debit_rail_savings
    }
}
