//! Domain error types.

/// Top-level error type for teamstock.
#[derive(Debug, thiserror::Error)]
pub enum StockError {
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    #[error("no price for {team} in week {week}")]
    DataGap { team: String, week: u32 },

    #[error("insufficient funds: requested {requested:.2}, available {available:.2}")]
    InsufficientFunds { requested: f64, available: f64 },

    #[error("insufficient holdings of {team}: requested {requested:.2} shares, held {held:.2}")]
    InsufficientHoldings {
        team: String,
        requested: f64,
        held: f64,
    },

    #[error("invalid trade amount {amount}")]
    InvalidAmount { amount: f64 },

    #[error("price for {team} in week {week} is not positive ({price})")]
    InvalidPrice { team: String, week: u32, price: f64 },

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

    #[error("match data error: {reason}")]
    MatchData { reason: String },

    #[error("no matches in {source_name}")]
    NoMatches { source_name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StockError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        StockError::Configuration {
            reason: reason.into(),
        }
    }

    /// Portfolio operations that were skipped without touching state.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StockError::InsufficientFunds { .. }
                | StockError::InsufficientHoldings { .. }
                | StockError::InvalidAmount { .. }
        )
    }
}

impl From<&StockError> for std::process::ExitCode {
    fn from(err: &StockError) -> Self {
        let code: u8 = match err {
            StockError::Io(_) => 1,
            StockError::Configuration { .. }
            | StockError::ConfigParse { .. }
            | StockError::ConfigMissing { .. }
            | StockError::ConfigInvalid { .. } => 2,
            StockError::MatchData { .. } | StockError::NoMatches { .. } => 3,
            StockError::DataGap { .. } | StockError::InvalidPrice { .. } => 4,
            StockError::InsufficientFunds { .. }
            | StockError::InsufficientHoldings { .. }
            | StockError::InvalidAmount { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
