//! The request shell around one engine.
//!
//! The desk owns the "current period" cursor and passes it into every
//! engine query explicitly. The engine itself never sees ambient state.

use crate::{
    command::{DeskCommand, DeskResponse, RoiReport},
    config::RoiConfig,
    engine::RoiEngine,
    error::{RoiError, RoiResult},
};

pub struct RoiDesk {
    engine:         RoiEngine,
    current_period: usize,
}

impl RoiDesk {
    pub fn new(config: RoiConfig) -> Self {
        Self {
            engine:         RoiEngine::with_config(config),
            current_period: 0,
        }
    }

    pub fn engine(&self) -> &RoiEngine {
        &self.engine
    }

    pub fn current_period(&self) -> usize {
        self.current_period
    }

    /// Move the cursor to `period`, clamped to the sequence length.
    pub fn seek(&mut self, period: usize) -> usize {
        self.current_period = period.min(self.engine.len());
        log::info!("desk: cursor at period {}", self.current_period);
        self.current_period
    }

    pub fn parse(line: &str) -> RoiResult<DeskCommand> {
        serde_json::from_str(line.trim()).map_err(|e| RoiError::MalformedInput {
            reason: e.to_string(),
        })
    }

    /// Parse and dispatch one JSON request. Always yields a response.
    pub fn handle_json(&mut self, line: &str) -> DeskResponse {
        match Self::parse(line) {
            Ok(cmd) => self.handle(cmd),
            Err(e) => {
                log::warn!("desk: rejected request: {e}");
                e.into()
            }
        }
    }

    pub fn handle(&mut self, cmd: DeskCommand) -> DeskResponse {
        match cmd {
            DeskCommand::AddPeriod(record) => {
                self.engine.append_period(record);
                self.ok("Period data added successfully")
            }
            DeskCommand::DeletePeriods => {
                self.engine.clear_periods();
                self.ok("All periods deleted successfully")
            }
            DeskCommand::ListPeriods => DeskResponse::Periods {
                periods: self.engine.periods().to_vec(),
            },
            DeskCommand::GetRoi => DeskResponse::Report(self.report()),
            DeskCommand::NextPeriod => {
                if self.current_period < self.engine.len() {
                    self.current_period += 1;
                    log::info!("desk: advanced to period {}", self.current_period);
                    let message = format!("Advanced to period {}", self.current_period);
                    self.ok(&message)
                } else {
                    self.ok("All periods loaded")
                }
            }
            DeskCommand::ResetPeriods => {
                self.current_period = 0;
                log::info!("desk: cursor reset");
                self.ok("Period counter reset")
            }
            DeskCommand::Health => DeskResponse::Healthy,
            // Only an interactive session can end; the desk has nothing to stop.
            DeskCommand::Quit => RoiError::MalformedInput {
                reason: "quit is only accepted by an interactive session".to_string(),
            }
            .into(),
        }
    }

    pub fn report(&self) -> RoiReport {
        let cursor = Some(self.current_period);
        RoiReport {
            results:        self.engine.compute_roi(cursor),
            alerts:         self.engine.get_alerts(cursor),
            trajectory:     self.engine.analyze_trajectory(cursor),
            current_period: self.current_period,
        }
    }

    fn ok(&self, message: &str) -> DeskResponse {
        DeskResponse::Ok {
            message:        message.to_string(),
            current_period: self.current_period,
        }
    }
}

impl Default for RoiDesk {
    fn default() -> Self { Self::new(RoiConfig::default()) }
}
