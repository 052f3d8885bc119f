//! Breakeven trajectory.
//!
//! The savings rate here is an endpoint slope over the non-baseline rows:
//! `(last_roi - first_roi) / row_count`. It is deliberately separate from
//! the forecaster's regression slope and the two may disagree in sign.

use crate::engine::RoiRow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Trajectory {
    /// Only the Period 0 row exists.
    InsufficientData,
    Projected {
        current_roi:       f64,
        /// Breakeven reached, or projected within the target.
        achieved:          bool,
        /// `None` when the trend is flat or negative.
        periods_remaining: Option<u64>,
        savings_rate:      f64,
    },
}

impl Trajectory {
    pub fn from_rows(rows: &[RoiRow], target_periods: u64) -> Self {
        let (Some(last), Some(tracked)) = (rows.last(), rows.get(1..)) else {
            return Self::InsufficientData;
        };
        if tracked.is_empty() {
            return Self::InsufficientData;
        }

        let current_roi = last.roi;
        let savings_rate =
            (tracked[tracked.len() - 1].roi - tracked[0].roi) / tracked.len() as f64;

        if current_roi >= 0.0 {
            return Self::Projected {
                current_roi,
                achieved: true,
                periods_remaining: Some(0),
                savings_rate,
            };
        }

        // Zero rate lands here too, so the division below is safe.
        if savings_rate <= 0.0 {
            return Self::Projected {
                current_roi,
                achieved: false,
                periods_remaining: None,
                savings_rate,
            };
        }

        let periods_remaining = (current_roi.abs() / savings_rate).ceil() as u64;
        Self::Projected {
            current_roi,
            achieved: periods_remaining <= target_periods,
            periods_remaining: Some(periods_remaining),
            savings_rate,
        }
    }

    pub fn achieved(&self) -> bool {
        matches!(self, Self::Projected { achieved: true, .. })
    }

    pub fn periods_remaining(&self) -> Option<u64> {
        match self {
            Self::Projected { periods_remaining, .. } => *periods_remaining,
            Self::InsufficientData => None,
        }
    }

    pub fn savings_rate(&self) -> Option<f64> {
        match self {
            Self::Projected { savings_rate, .. } => Some(*savings_rate),
            Self::InsufficientData => None,
        }
    }
}
