//! Whole-portfolio totals shown above the sector tables.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::holding::EnrichedHolding;
use super::money::round2;
use super::sector::SectorAggregate;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_investment: f64,
    pub total_present_value: f64,
    pub total_gain_loss: f64,
    /// Gain/loss relative to investment, in percent. Zero for an empty book.
    pub gain_loss_percentage: f64,
    pub holding_count: usize,
    pub last_updated: DateTime<Utc>,
}

impl PortfolioSummary {
    pub fn compute(holdings: &[EnrichedHolding], last_updated: DateTime<Utc>) -> Self {
        let total_investment = round2(holdings.iter().map(|h| h.investment).sum());
        let total_present_value = round2(holdings.iter().map(|h| h.present_value).sum());
        let total_gain_loss = round2(total_present_value - total_investment);
        let gain_loss_percentage = if total_investment > 0.0 {
            round2(total_gain_loss / total_investment * 100.0)
        } else {
            0.0
        };

        PortfolioSummary {
            total_investment,
            total_present_value,
            total_gain_loss,
            gain_loss_percentage,
            holding_count: holdings.len(),
            last_updated,
        }
    }
}

/// Summary and sector breakdown served together.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub summary: PortfolioSummary,
    pub sectors: Vec<SectorAggregate>,
}
