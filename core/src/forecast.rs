//! Linear trend fit for the ROI forecast.
//!
//! Ordinary least squares of value against position (0, 1, 2, …).
//! Refitted from scratch on every query; the series is tens of points.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTrend {
    pub slope:     f64,
    pub intercept: f64,
}

impl LinearTrend {
    /// Fit a line through `values` keyed by index. Needs two points.
    pub fn fit(values: &[f64]) -> Option<Self> {
        if values.len() < 2 {
            return None;
        }

        let n = values.len() as f64;
        let mean_x = (n - 1.0) / 2.0;
        let mean_y = values.iter().sum::<f64>() / n;

        let (mut sxy, mut sxx) = (0.0, 0.0);
        for (i, y) in values.iter().enumerate() {
            let dx = i as f64 - mean_x;
            sxy += dx * (y - mean_y);
            sxx += dx * dx;
        }

        let slope = sxy / sxx;
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn predict(&self, x: usize) -> f64 {
        self.intercept + self.slope * x as f64
    }
}
