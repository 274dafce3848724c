//! Domain error types.

use chrono::NaiveDate;

/// Rejection of a simulation input before any state is mutated.
///
/// Raised only at the engine boundary; once a series passes validation the
/// walk itself cannot fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("need at least 2 records to simulate, got {got}")]
    TooFewRecords { got: usize },

    #[error("record {index}: close must be a positive finite number, got {close}")]
    BadPrice { index: usize, close: f64 },

    #[error("record {index}: signal value {value} is not one of -1, 0, 1")]
    SignalOutOfDomain { index: usize, value: i64 },

    #[error("record {index}: timestamp {date} does not advance past {prev}")]
    NonIncreasingTimestamp {
        index: usize,
        date: NaiveDate,
        prev: NaiveDate,
    },

    #[error("starting cash must be a positive finite number, got {0}")]
    BadStartingCash(f64),
}

/// Top-level error type for sigtrader.
#[derive(Debug, thiserror::Error)]
pub enum SigtraderError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SigtraderError> for std::process::ExitCode {
    fn from(err: &SigtraderError) -> Self {
        let code: u8 = match err {
            SigtraderError::Io(_) => 1,
            SigtraderError::ConfigParse { .. }
            | SigtraderError::ConfigMissing { .. }
            | SigtraderError::ConfigInvalid { .. } => 2,
            SigtraderError::Data { .. } => 3,
            SigtraderError::Validation(_) => 4,
        };
        std::process::ExitCode::from(code)
    }
}
