//! The Period Record: one accounting period's raw inputs.

use crate::types::PeriodLabel;
use serde::{Deserialize, Serialize};

/// Volumes and counts for the card and direct-debit rails, plus the two
/// card rates. Rates are percentages (`3.2` means 3.2%).
///
/// The engine never validates these; non-negative volumes and counts are
/// the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub label:                   PeriodLabel,
    pub card_volume:             f64,
    pub card_count:              u64,
    pub debit_volume:            f64,
    pub debit_count:             u64,
    /// Counterfactual baseline rate, applied to both rails.
    pub card_rate_percent:       f64,
    /// Rate actually charged on card volume.
    pub convenience_fee_percent: f64,
}

impl PeriodRecord {
    pub fn total_volume(&self) -> f64 {
        self.card_volume + self.debit_volume
    }
}
