//! Domain error types.

/// Top-level error type for portfolio-tracker.
#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("no quote available for {symbol}")]
    QuoteNotFound { symbol: String },

    #[error("stock not found: {symbol}")]
    StockNotFound { symbol: String },

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

    #[error("failed to load {source_name}: {reason}")]
    DataLoad { source_name: String, reason: String },

    #[error("invalid holding {id}: {reason}")]
    InvalidHolding { id: String, reason: String },

    #[error("internal error: {reason}")]
    Internal { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PortfolioError {
    pub(crate) fn invalid_config(section: &str, key: &str, reason: impl Into<String>) -> Self {
        PortfolioError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn data_load(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        PortfolioError::DataLoad {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// True for lookup misses that a caller can report as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PortfolioError::QuoteNotFound { .. } | PortfolioError::StockNotFound { .. }
        )
    }
}

impl From<&PortfolioError> for std::process::ExitCode {
    fn from(err: &PortfolioError) -> Self {
        let code: u8 = match err {
            PortfolioError::Io(_) => 1,
            PortfolioError::ConfigParse { .. }
            | PortfolioError::ConfigMissing { .. }
            | PortfolioError::ConfigInvalid { .. } => 2,
            PortfolioError::DataLoad { .. } | PortfolioError::InvalidHolding { .. } => 3,
            PortfolioError::QuoteNotFound { .. } | PortfolioError::StockNotFound { .. } => 4,
            PortfolioError::Internal { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
