//! The ROI engine.
//!
//! Owns the append-only period sequence. Every query recomputes the
//! result rows from scratch up to the caller's cursor:
//!   1. Period 0: the investment itself, ROI = -subscription cost.
//!   2. One row per included period, accumulating savings.
//!   3. With two or more periods, a linear trend is fitted over all rows
//!      (Period 0 included) and every row's forecast is overwritten.
//!
//! The engine holds no locks. Callers serialize access.

use crate::{
    alert::{self, Alert},
    config::RoiConfig,
    cost_model::PeriodCosts,
    forecast::LinearTrend,
    period::PeriodRecord,
    trajectory::Trajectory,
    types::{Cursor, PeriodLabel},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const BASELINE_LABEL: &str = "Period 0";

/// The numbers behind one row's ROI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNumbers {
    pub subscription_cost:   f64,
    pub cumulative_savings:  f64,
    pub period_savings:      f64,
    pub card_fee_savings:    f64,
    pub debit_rail_cost:     f64,
    pub debit_rail_savings:  f64,
    pub potential_card_cost: f64,
    pub actual_card_cost:    f64,
}

impl RawNumbers {
    fn baseline(subscription_cost: f64) -> Self {
        Self {
            subscription_cost,
            cumulative_savings:  0.0,
            period_savings:      0.0,
            card_fee_savings:    0.0,
            debit_rail_cost:     0.0,
            debit_rail_savings:  0.0,
            potential_card_cost: 0.0,
            actual_card_cost:    0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiRow {
    pub period:      PeriodLabel,
    pub roi:         f64,
    pub forecast:    f64,
    pub raw_numbers: RawNumbers,
}

pub struct RoiEngine {
    config:  RoiConfig,
    periods: Vec<PeriodRecord>,
}

impl RoiEngine {
    pub fn new() -> Self {
        Self::with_config(RoiConfig::default())
    }

    pub fn with_config(config: RoiConfig) -> Self {
        Self {
            config,
            periods: Vec::new(),
        }
    }

    pub fn config(&self) -> &RoiConfig {
        &self.config
    }

    /// Append a record verbatim. No validation.
    pub fn append_period(&mut self, record: PeriodRecord) {
        log::info!(
            "engine: appended period {} (total {})",
            record.label,
            self.periods.len() + 1
        );
        self.periods.push(record);
    }

    pub fn clear_periods(&mut self) {
        log::info!("engine: cleared {} periods", self.periods.len());
        self.periods.clear();
    }

    pub fn periods(&self) -> &[PeriodRecord] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Result rows for the leading `cursor` periods (all when `None`).
    /// An oversized cursor is clamped to the sequence length.
    pub fn compute_roi(&self, cursor: Cursor) -> Vec<RoiRow> {
        let cost = self.config.subscription_cost;
        let mut rows = vec![RoiRow {
            period:      BASELINE_LABEL.to_string(),
            roi:         -cost,
            forecast:    -cost,
            raw_numbers: RawNumbers::baseline(cost),
        }];

        if self.periods.is_empty() {
            return rows;
        }

        let included = cursor.unwrap_or(self.periods.len()).min(self.periods.len());
        let mut cumulative_savings = 0.0;

        for period in &self.periods[..included] {
            let costs = PeriodCosts::compute(period, self.config.debit_cost_per_transaction);
            let period_savings = costs.period_savings();
            cumulative_savings += period_savings;

            rows.push(RoiRow {
                period:   period.label.clone(),
                roi:      cumulative_savings - cost,
                forecast: 0.0,
                raw_numbers: RawNumbers {
                    subscription_cost:   cost,
                    cumulative_savings,
                    period_savings,
                    card_fee_savings:    costs.card_fee_savings,
                    debit_rail_cost:     costs.debit_rail_cost,
                    debit_rail_savings:  costs.debit_rail_savings,
                    potential_card_cost: costs.potential_card_cost,
                    actual_card_cost:    costs.actual_card_cost,
                },
            });
        }

        if included >= 2 {
            let values: Vec<f64> = rows.iter().map(|r| r.roi).collect();
            if let Some(trend) = LinearTrend::fit(&values) {
                for (i, row) in rows.iter_mut().enumerate() {
                    row.forecast = trend.predict(i);
                }
                log::debug!(
                    "engine: fitted trend over {} rows slope={:.2} intercept={:.2}",
                    rows.len(),
                    trend.slope,
                    trend.intercept
                );
            }
        }

        rows
    }

    pub fn analyze_trajectory(&self, cursor: Cursor) -> Trajectory {
        Trajectory::from_rows(&self.compute_roi(cursor), self.config.target_periods_to_roi)
    }

    pub fn get_alerts(&self, cursor: Cursor) -> Vec<Alert> {
        self.alerts_at(cursor, Utc::now())
    }

    /// `get_alerts` with every alert stamped `now`.
    pub fn alerts_at(&self, cursor: Cursor, now: DateTime<Utc>) -> Vec<Alert> {
        let rows = self.compute_roi(cursor);
        let trajectory = Trajectory::from_rows(&rows, self.config.target_periods_to_roi);
        alert::derive(&rows, &trajectory, &self.config, now)
    }
}

impl Default for RoiEngine {
    fn default() -> Self { Self::new() }
}
