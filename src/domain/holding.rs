//! Holdings and their valued form.

use serde::Serialize;

/// A purchased position, as configured.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    #[serde(rename = "particulars")]
    pub name: String,
    pub symbol: String,
    pub purchase_price: f64,
    pub quantity: u32,
    pub exchange: String,
    pub sector: String,
}

impl Holding {
    /// Unrounded cost basis.
    pub fn cost(&self) -> f64 {
        self.purchase_price * f64::from(self.quantity)
    }
}

/// A holding joined with its quote and the derived valuation fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedHolding {
    #[serde(flatten)]
    pub holding: Holding,
    pub investment: f64,
    pub portfolio_percentage: f64,
    pub cmp: f64,
    pub present_value: f64,
    pub gain_loss: f64,
    pub pe_ratio: f64,
    pub latest_earnings: f64,
}

impl EnrichedHolding {
    pub fn is_gain(&self) -> bool {
        self.gain_loss >= 0.0
    }
}
