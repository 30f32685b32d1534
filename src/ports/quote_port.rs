//! Quote lookup port.
//!
//! The simulated quote book implements this today; a live market-data
//! provider would implement the same contract.

use crate::domain::error::PortfolioError;
use crate::domain::quote::Quote;

pub trait QuotePort {
    /// Current quote for `symbol`, or `QuoteNotFound`.
    fn quote(&self, symbol: &str) -> Result<Quote, PortfolioError>;
}
