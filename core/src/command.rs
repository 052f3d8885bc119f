use crate::{
    alert::Alert,
    engine::RoiRow,
    error::RoiError,
    period::PeriodRecord,
    trajectory::Trajectory,
};
use serde::{Deserialize, Serialize};

/// Every request the desk accepts, one JSON object per request.
///
/// `add_period` carries the record's fields inline:
/// `{"cmd":"add_period","label":"Period 1","card_volume":1000.0,...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DeskCommand {
    // ── Period sequence ───────────────────────────
    AddPeriod(PeriodRecord),
    DeletePeriods,
    ListPeriods,

    // ── Queries ───────────────────────────────────
    GetRoi,

    // ── Cursor control ────────────────────────────
    NextPeriod,
    ResetPeriods,

    // ── Session ───────────────────────────────────
    Health,
    /// Ends an IPC session. The desk itself answers it with a client error.
    Quit,
}

/// Everything the desk reports for its current cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiReport {
    pub results:        Vec<RoiRow>,
    pub alerts:         Vec<Alert>,
    pub trajectory:     Trajectory,
    pub current_period: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeskResponse {
    Ok {
        message:        String,
        current_period: usize,
    },
    Periods {
        periods: Vec<PeriodRecord>,
    },
    Report(RoiReport),
    Healthy,
    ClientError {
        detail: String,
    },
    ServerError {
        detail: String,
    },
}

impl DeskResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::ClientError { .. } | Self::ServerError { .. })
    }
}

impl From<RoiError> for DeskResponse {
    fn from(err: RoiError) -> Self {
        if err.is_client_error() {
            Self::ClientError { detail: err.to_string() }
        } else {
            Self::ServerError { detail: err.to_string() }
        }
    }
}
