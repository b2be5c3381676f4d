//! Domain error taxonomy.
//!
//! Ledger precondition failures (insufficient funds/holdings) are not
//! errors; they are modelled as rejections in [`crate::domain::ledger`].
//! Everything here either aborts a run (config, I/O) or skips a single
//! evaluation cycle (data problems).

/// Top-level error type for crosstrader.
#[derive(Debug, thiserror::Error)]
pub enum CrosstraderError {
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

    #[error("insufficient price history: have {have} closes, need {need}")]
    InsufficientData { have: usize, need: usize },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("no market data for {instrument}: {reason}")]
    DataUnavailable { instrument: String, reason: String },

    #[error("no current price for {instrument}")]
    PriceUnavailable { instrument: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CrosstraderError {
    /// True for failures that should skip the current evaluation cycle
    /// rather than abort the process.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CrosstraderError::InsufficientData { .. }
                | CrosstraderError::DataUnavailable { .. }
                | CrosstraderError::PriceUnavailable { .. }
        )
    }
}

impl From<&CrosstraderError> for std::process::ExitCode {
    fn from(err: &CrosstraderError) -> Self {
        let code: u8 = match err {
            CrosstraderError::Io(_) => 1,
            CrosstraderError::ConfigParse { .. }
            | CrosstraderError::ConfigMissing { .. }
            | CrosstraderError::ConfigInvalid { .. } => 2,
            CrosstraderError::InvalidInput { .. } => 3,
            CrosstraderError::InsufficientData { .. }
            | CrosstraderError::DataUnavailable { .. }
            | CrosstraderError::PriceUnavailable { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
