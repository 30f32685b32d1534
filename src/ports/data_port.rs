//! Portfolio data source port.

use crate::domain::error::PortfolioError;
use crate::domain::holding::Holding;
use crate::domain::quote::QuoteBook;

/// Where holdings and their starting quotes come from.
pub trait PortfolioDataPort {
    /// Holdings in display order.
    fn load_holdings(&self) -> Result<Vec<Holding>, PortfolioError>;

    /// Baseline quotes that refreshes start from.
    fn load_quotes(&self) -> Result<QuoteBook, PortfolioError>;

    /// Human-readable name for log lines.
    fn describe(&self) -> String;
}
