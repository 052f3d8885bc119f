use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoiError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed input: {reason}")]
    MalformedInput { reason: String },

    #[error("Cannot use config {path}: {reason}")]
    Config { path: String, reason: String },

    #[error("Period sink not live after {attempts} attempts")]
    SinkUnavailable { attempts: u32 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RoiError {
    /// Client errors are the caller's fault; everything else is ours.
    pub fn is_client_error(&self) -> bool {
        matches!(self, RoiError::MalformedInput { .. })
    }
}

pub type RoiResult<T> = Result<T, RoiError>;
