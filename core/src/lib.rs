//! ROI tracking for a payment-processing platform.
//!
//! The engine ingests per-period card and direct-debit activity, measures
//! savings against an all-card baseline, accumulates them against a
//! one-time subscription cost and forecasts breakeven with a linear trend.

pub mod alert;
pub mod command;
pub mod config;
pub mod cost_model;
pub mod desk;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod loader;
pub mod period;
pub mod rng;
pub mod trajectory;
pub mod types;
