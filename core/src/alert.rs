//! Human-readable status alerts derived from the ROI rows and trajectory.

use crate::{config::RoiConfig, engine::RoiRow, trajectory::Trajectory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub level:     AlertLevel,
    pub message:   String,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    fn new(level: AlertLevel, message: String, timestamp: DateTime<Utc>) -> Self {
        Self { level, message, timestamp }
    }
}

pub fn derive(
    rows: &[RoiRow],
    trajectory: &Trajectory,
    config: &RoiConfig,
    now: DateTime<Utc>,
) -> Vec<Alert> {
    let current_roi = match rows.last() {
        Some(last) if rows.len() > 1 => last.roi,
        _ => {
            return vec![Alert::new(
                AlertLevel::Info,
                format!("Initial investment: {}", format_currency(config.subscription_cost)),
                now,
            )];
        }
    };

    let mut alerts = Vec::new();
    let savings_rate = trajectory.savings_rate();

    if current_roi > 0.0 {
        alerts.push(Alert::new(
            AlertLevel::Success,
            format!(
                "Break-even achieved! Current savings: {} above subscription cost",
                format_currency(current_roi)
            ),
            now,
        ));
        // A zero rate says nothing worth reporting.
        if let Some(rate) = savings_rate.filter(|r| *r != 0.0) {
            alerts.push(Alert::new(
                AlertLevel::Info,
                format!("Average savings increase per period: {}", format_currency(rate)),
                now,
            ));
        }
        return alerts;
    }

    alerts.push(Alert::new(
        AlertLevel::Info,
        format!(
            "{} more in savings needed to break even",
            format_currency(current_roi.abs())
        ),
        now,
    ));

    match trajectory.periods_remaining() {
        Some(periods) if trajectory.achieved() => alerts.push(Alert::new(
            AlertLevel::Info,
            format!("On track to achieve ROI in {periods} periods"),
            now,
        )),
        Some(periods) => alerts.push(Alert::new(
            AlertLevel::Warning,
            format!(
                "ROI trajectory concerning - projected to take {periods} periods (target: {})",
                config.target_periods_to_roi
            ),
            now,
        )),
        None if savings_rate.is_some_and(|r| r <= 0.0) => alerts.push(Alert::new(
            AlertLevel::Error,
            "Critical: Current trajectory shows decreasing or flat savings rate".to_string(),
            now,
        )),
        None => {}
    }

    alerts
}

/// `$1,234.56` style. Negative amounts render as `$-1,234.56`.
/// Non-finite amounts render bare: `$inf`, `$NaN`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${amount}");
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("${sign}{grouped}.{cents}")
}
