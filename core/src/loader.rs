//! Bulk loader: pushes a batch of sample periods through the desk.
//!
//! Order of work:
//!   1. Poll the sink until it reports live (bounded retries).
//!   2. Clear existing periods. A failed clear is logged, not fatal.
//!   3. Submit one record per sample period, in order. Failures are
//!      logged and counted; the batch always runs to the end.

use crate::{
    command::{DeskCommand, DeskResponse},
    config::LoaderConfig,
    desk::RoiDesk,
    error::{RoiError, RoiResult},
    period::PeriodRecord,
    rng::SampleRng,
    types::PeriodLabel,
};
use serde::{Deserialize, Serialize};
use std::{path::Path, thread, time::Duration};

const BUILTIN_SAMPLE: &str = include_str!("../../data/sample_periods.json");

/// Volume ranges the builtin sample was drawn from.
const CARD_VOLUME_RANGE: (f64, f64) = (2_000_000.0, 4_000_000.0);
const DEBIT_VOLUME_RANGE: (f64, f64) = (1_000_000.0, 2_500_000.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePeriod {
    pub label:        PeriodLabel,
    pub card_volume:  f64,
    pub debit_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleBatch {
    pub periods: Vec<SamplePeriod>,
}

impl SampleBatch {
    /// The 24-period sample shipped in `data/sample_periods.json`.
    pub fn builtin() -> RoiResult<Self> {
        Ok(serde_json::from_str(BUILTIN_SAMPLE)?)
    }

    pub fn load(path: impl AsRef<Path>) -> RoiResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| RoiError::Config {
            path:   path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// A seeded batch with volumes drawn from the builtin sample's ranges.
    pub fn synthesize(seed: u64, count: usize) -> Self {
        let mut rng = SampleRng::new(seed);
        let periods = (1..=count)
            .map(|n| SamplePeriod {
                label:        format!("Period {n}"),
                card_volume:  rng.uniform_cents(CARD_VOLUME_RANGE.0, CARD_VOLUME_RANGE.1),
                debit_volume: rng.uniform_cents(DEBIT_VOLUME_RANGE.0, DEBIT_VOLUME_RANGE.1),
            })
            .collect();
        Self { periods }
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

/// Counts are derived as `floor(volume / average transaction amount)`.
pub fn to_record(sample: &SamplePeriod, config: &LoaderConfig) -> PeriodRecord {
    PeriodRecord {
        label:                   sample.label.clone(),
        card_volume:             sample.card_volume,
        card_count:              transaction_count(sample.card_volume, config.avg_card_transaction_amount),
        debit_volume:            sample.debit_volume,
        debit_count:             transaction_count(sample.debit_volume, config.avg_debit_transaction_amount),
        card_rate_percent:       config.card_rate_percent,
        convenience_fee_percent: config.convenience_fee_percent,
    }
}

fn transaction_count(volume: f64, avg_amount: f64) -> u64 {
    if avg_amount <= 0.0 {
        return 0;
    }
    (volume / avg_amount).floor().max(0.0) as u64
}

/// The loader's view of the request shell.
pub trait PeriodSink {
    fn is_live(&mut self) -> bool;
    fn clear(&mut self) -> RoiResult<()>;
    fn submit(&mut self, record: PeriodRecord) -> RoiResult<()>;
}

impl PeriodSink for RoiDesk {
    fn is_live(&mut self) -> bool {
        matches!(self.handle(DeskCommand::Health), DeskResponse::Healthy)
    }

    fn clear(&mut self) -> RoiResult<()> {
        expect_ok(self.handle(DeskCommand::DeletePeriods))
    }

    fn submit(&mut self, record: PeriodRecord) -> RoiResult<()> {
        expect_ok(self.handle(DeskCommand::AddPeriod(record)))
    }
}

fn expect_ok(response: DeskResponse) -> RoiResult<()> {
    match response {
        DeskResponse::ClientError { detail } => Err(RoiError::MalformedInput { reason: detail }),
        DeskResponse::ServerError { detail } => Err(anyhow::anyhow!(detail).into()),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub loaded: usize,
    pub failed: usize,
}

pub fn wait_until_live<S: PeriodSink>(sink: &mut S, config: &LoaderConfig) -> RoiResult<()> {
    for attempt in 1..=config.max_retries {
        if sink.is_live() {
            log::info!("loader: sink live after {attempt} attempt(s)");
            return Ok(());
        }
        log::debug!("loader: sink not live, attempt {attempt}/{}", config.max_retries);
        if attempt < config.max_retries {
            thread::sleep(Duration::from_millis(config.retry_delay_ms));
        }
    }
    Err(RoiError::SinkUnavailable {
        attempts: config.max_retries,
    })
}

pub fn load_batch<S: PeriodSink>(
    sink: &mut S,
    batch: &SampleBatch,
    config: &LoaderConfig,
) -> RoiResult<LoadSummary> {
    wait_until_live(sink, config)?;

    if let Err(e) = sink.clear() {
        log::warn!("loader: failed to delete existing periods, loading anyway: {e}");
    }

    let mut summary = LoadSummary::default();
    for sample in &batch.periods {
        match sink.submit(to_record(sample, config)) {
            Ok(()) => {
                log::debug!("loader: loaded {}", sample.label);
                summary.loaded += 1;
            }
            Err(e) => {
                log::warn!("loader: failed to load {}: {e}", sample.label);
                summary.failed += 1;
            }
        }
    }

    log::info!(
        "loader: complete, {} loaded, {} failed",
        summary.loaded,
        summary.failed
    );
    Ok(summary)
}
