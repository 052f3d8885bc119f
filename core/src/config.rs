//! Engine and loader configuration.
//!
//! Both configs deserialize from JSON. Any field left out of the file
//! falls back to its default, so an empty object `{}` is a valid config.

use crate::error::{RoiError, RoiResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Flat one-time platform cost.
pub const SUBSCRIPTION_COST: f64 = 170_000.0;
/// Flat fee per direct-debit transaction, independent of volume.
pub const FIXED_DEBIT_COST_PER_TRANSACTION: f64 = 0.25;
/// Breakeven target used by trajectory analysis.
pub const TARGET_PERIODS_TO_ROI: u64 = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiConfig {
    pub subscription_cost: f64,
    pub debit_cost_per_transaction: f64,
    pub target_periods_to_roi: u64,
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self {
            subscription_cost:          SUBSCRIPTION_COST,
            debit_cost_per_transaction: FIXED_DEBIT_COST_PER_TRANSACTION,
            target_periods_to_roi:      TARGET_PERIODS_TO_ROI,
        }
    }
}

impl RoiConfig {
    pub fn load(path: impl AsRef<Path>) -> RoiResult<Self> {
        read_json(path.as_ref())
    }
}

/// Settings for the bulk loader: how sample volumes become records,
/// and how patiently to wait for the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub avg_debit_transaction_amount: f64,
    pub avg_card_transaction_amount:  f64,
    pub card_rate_percent:            f64,
    pub convenience_fee_percent:      f64,
    pub max_retries:                  u32,
    pub retry_delay_ms:               u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            avg_debit_transaction_amount: 29_523.0,
            avg_card_transaction_amount:  5_999.0,
            card_rate_percent:            3.2,
            convenience_fee_percent:      2.5,
            max_retries:                  30,
            retry_delay_ms:               2_000,
        }
    }
}

impl LoaderConfig {
    pub fn load(path: impl AsRef<Path>) -> RoiResult<Self> {
        read_json(path.as_ref())
    }

    /// Defaults with no waiting between liveness polls. For tests.
    pub fn default_test() -> Self {
        Self {
            max_retries: 3,
            retry_delay_ms: 0,
            ..Self::default()
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> RoiResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| RoiError::Config {
        path:   path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| RoiError::Config {
        path:   path.display().to_string(),
        reason: e.to_string(),
    })
}
