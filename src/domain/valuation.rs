//! Portfolio valuation.
//!
//! Joins each holding with its quote and derives investment, present value,
//! gain/loss and the holding's share of total investment. Currency fields are
//! rounded to cents as they are derived; the percentage is left unrounded so
//! the shares always add up to 100.

use super::error::PortfolioError;
use super::holding::{EnrichedHolding, Holding};
use super::money::round2;
use crate::ports::quote_port::QuotePort;

/// Sum of rounded cost across `holdings`.
pub fn total_investment(holdings: &[Holding]) -> f64 {
    holdings.iter().map(|h| round2(h.cost())).sum()
}

/// Value every holding against `quotes`.
///
/// Fails with `QuoteNotFound` on the first holding whose symbol has no quote.
/// When total investment is zero every percentage is zero.
pub fn enrich_holdings(
    holdings: &[Holding],
    quotes: &dyn QuotePort,
) -> Result<Vec<EnrichedHolding>, PortfolioError> {
    let total = total_investment(holdings);

    holdings
        .iter()
        .map(|holding| {
            let quote = quotes.quote(&holding.symbol)?;
            let investment = round2(holding.cost());
            let present_value = round2(quote.cmp * f64::from(holding.quantity));
            let gain_loss = round2(present_value - investment);
            let portfolio_percentage = if total > 0.0 {
                investment / total * 100.0
            } else {
                0.0
            };

            Ok(EnrichedHolding {
                holding: holding.clone(),
                investment,
                portfolio_percentage,
                cmp: quote.cmp,
                present_value,
                gain_loss,
                pe_ratio: quote.pe_ratio,
                latest_earnings: quote.latest_earnings,
            })
        })
        .collect()
}
