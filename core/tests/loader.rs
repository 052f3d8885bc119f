//! Bulk loader tests.

use roi_core::{
    config::LoaderConfig,
    desk::RoiDesk,
    error::{RoiError, RoiResult},
    loader::{self, PeriodSink, SampleBatch, SamplePeriod},
    period::PeriodRecord,
};

/// A sink that can be slow to come up and can reject chosen submissions.
struct ScriptedSink {
    live_after:   u32,
    polls:        u32,
    fail_clear:   bool,
    reject_every: Option<usize>,
    submissions:  usize,
    accepted:     Vec<PeriodRecord>,
}

impl ScriptedSink {
    fn new() -> Self {
        Self {
            live_after:   1,
            polls:        0,
            fail_clear:   false,
            reject_every: None,
            submissions:  0,
            accepted:     Vec::new(),
        }
    }
}

impl PeriodSink for ScriptedSink {
    fn is_live(&mut self) -> bool {
        self.polls += 1;
        self.polls >= self.live_after
    }

    fn clear(&mut self) -> RoiResult<()> {
        if self.fail_clear {
            return Err(anyhow::anyhow!("delete refused").into());
        }
        self.accepted.clear();
        Ok(())
    }

    fn submit(&mut self, record: PeriodRecord) -> RoiResult<()> {
        self.submissions += 1;
        if let Some(n) = self.reject_every {
            if self.submissions % n == 0 {
                return Err(RoiError::MalformedInput {
                    reason: format!("rejected {}", record.label),
                });
            }
        }
        self.accepted.push(record);
        Ok(())
    }
}

#[test]
fn builtin_sample_has_twenty_four_periods() {
    let batch = SampleBatch::builtin().expect("builtin sample parses");
    assert_eq!(batch.len(), 24);
    assert_eq!(batch.periods[0].label, "Period 1");
    assert_eq!(batch.periods[23].label, "Period 24");
}

#[test]
fn counts_are_floored_from_average_amounts() {
    let sample = SamplePeriod {
        label:        "Period 1".into(),
        card_volume:  2_749_080.24,
        debit_volume: 1_684_104.98,
    };
    let record = loader::to_record(&sample, &LoaderConfig::default());

    assert_eq!(record.card_count, 458);
    assert_eq!(record.debit_count, 57);
    assert_eq!(record.card_rate_percent, 3.2);
    assert_eq!(record.convenience_fee_percent, 2.5);
    assert_eq!(record.card_volume, sample.card_volume);
}

#[test]
fn loading_into_a_desk_replaces_existing_periods() {
    let mut desk = RoiDesk::default();
    let stale = SampleBatch::synthesize(1, 5);
    loader::load_batch(&mut desk, &stale, &LoaderConfig::default_test()).unwrap();

    let batch = SampleBatch::builtin().unwrap();
    let summary = loader::load_batch(&mut desk, &batch, &LoaderConfig::default_test()).unwrap();

    assert_eq!(summary.loaded, 24);
    assert_eq!(summary.failed, 0);
    assert_eq!(desk.engine().len(), 24);
    assert_eq!(desk.engine().periods()[0].label, "Period 1");
}

#[test]
fn sample_breaks_even_in_second_period() {
    let mut desk = RoiDesk::default();
    let batch = SampleBatch::builtin().unwrap();
    loader::load_batch(&mut desk, &batch, &LoaderConfig::default_test()).unwrap();

    let rows = desk.engine().compute_roi(Some(2));
    assert!(rows[1].roi < 0.0, "period 1 ROI {}", rows[1].roi);
    assert!(rows[2].roi > 0.0, "period 2 ROI {}", rows[2].roi);
    assert!((rows[1].roi - (-96_879.33)).abs() < 0.01);
}

#[test]
fn failed_submissions_are_counted_not_fatal() {
    let mut sink = ScriptedSink::new();
    sink.reject_every = Some(3);
    let batch = SampleBatch::synthesize(9, 10);

    let summary = loader::load_batch(&mut sink, &batch, &LoaderConfig::default_test()).unwrap();
    assert_eq!(summary.loaded, 7);
    assert_eq!(summary.failed, 3);
    assert_eq!(sink.accepted.len(), 7);
}

#[test]
fn failed_clear_still_loads() {
    let mut sink = ScriptedSink::new();
    sink.fail_clear = true;
    let batch = SampleBatch::synthesize(3, 4);

    let summary = loader::load_batch(&mut sink, &batch, &LoaderConfig::default_test()).unwrap();
    assert_eq!(summary.loaded, 4);
}

#[test]
fn waits_for_a_slow_sink() {
    let mut sink = ScriptedSink::new();
    sink.live_after = 3;
    let config = LoaderConfig::default_test();

    let summary = loader::load_batch(&mut sink, &SampleBatch::synthesize(1, 2), &config).unwrap();
    assert_eq!(sink.polls, 3);
    assert_eq!(summary.loaded, 2);
}

#[test]
fn gives_up_on_a_dead_sink() {
    let mut sink = ScriptedSink::new();
    sink.live_after = u32::MAX;
    let config = LoaderConfig::default_test();

    let err = loader::load_batch(&mut sink, &SampleBatch::synthesize(1, 2), &config).unwrap_err();
    assert!(matches!(err, RoiError::SinkUnavailable { attempts: 3 }), "got {err:?}");
    assert_eq!(sink.submissions, 0, "nothing should be submitted");
}

#[test]
fn no_delay_after_the_final_failed_poll() {
    let mut sink = ScriptedSink::new();
    sink.live_after = u32::MAX;
    let config = LoaderConfig {
        max_retries: 1,
        retry_delay_ms: 60_000,
        ..LoaderConfig::default_test()
    };

    let started = std::time::Instant::now();
    let err = loader::wait_until_live(&mut sink, &config).unwrap_err();
    assert!(matches!(err, RoiError::SinkUnavailable { attempts: 1 }), "got {err:?}");
    assert!(
        started.elapsed() < std::time::Duration::from_secs(5),
        "gave up only after {:?}",
        started.elapsed()
    );
}

#[test]
fn synthesized_volumes_stay_in_sample_ranges() {
    let batch = SampleBatch::synthesize(0xC0FFEE, 100);
    assert_eq!(batch.len(), 100);
    assert_eq!(batch.periods[99].label, "Period 100");
    for p in &batch.periods {
        assert!((2_000_000.0..=4_000_000.0).contains(&p.card_volume), "{p:?}");
        assert!((1_000_000.0..=2_500_000.0).contains(&p.debit_volume), "{p:?}");
    }
}
