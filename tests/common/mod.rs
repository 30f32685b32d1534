#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use portfolio_tracker::domain::error::PortfolioError;
use portfolio_tracker::domain::holding::Holding;
use portfolio_tracker::domain::quote::{Quote, QuoteBook};
use portfolio_tracker::domain::snapshot::MarketSnapshot;
use portfolio_tracker::ports::data_port::PortfolioDataPort;

pub fn holding(id: &str, name: &str, symbol: &str, price: f64, quantity: u32, sector: &str) -> Holding {
    Holding {
        id: id.to_string(),
        name: name.to_string(),
        symbol: symbol.to_string(),
        purchase_price: price,
        quantity,
        exchange: "NSE".to_string(),
        sector: sector.to_string(),
    }
}

pub fn quote(symbol: &str, cmp: f64, pe_ratio: f64, latest_earnings: f64) -> Quote {
    Quote {
        symbol: symbol.to_string(),
        cmp,
        pe_ratio,
        latest_earnings,
    }
}

/// Three holdings across two sectors, Financials first.
pub fn sample_holdings() -> Vec<Holding> {
    vec![
        holding("1", "HDFC Bank Ltd", "HDFCBANK", 1450.0, 50, "Financials"),
        holding("2", "Infosys Ltd", "INFY", 1420.0, 40, "Technology"),
        holding("3", "ICICI Bank Ltd", "ICICIBANK", 820.0, 60, "Financials"),
    ]
}

pub fn sample_quotes() -> QuoteBook {
    [
        quote("HDFCBANK", 1580.0, 18.5, 12_500.0),
        quote("INFY", 1465.0, 22.3, 15_200.0),
        quote("ICICIBANK", 875.0, 16.2, 9_800.0),
    ]
    .into_iter()
    .collect()
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 15, 0).unwrap()
}

pub fn sample_snapshot() -> MarketSnapshot {
    MarketSnapshot::initial(sample_quotes(), fixed_time())
}

pub struct MockDataPort {
    pub holdings: Vec<Holding>,
    pub quotes: QuoteBook,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            holdings: sample_holdings(),
            quotes: sample_quotes(),
            error: None,
        }
    }

    pub fn with_holding(mut self, holding: Holding) -> Self {
        self.holdings.push(holding);
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl PortfolioDataPort for MockDataPort {
    fn load_holdings(&self) -> Result<Vec<Holding>, PortfolioError> {
        if let Some(reason) = &self.error {
            return Err(PortfolioError::DataLoad {
                source_name: "mock".to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.holdings.clone())
    }

    fn load_quotes(&self) -> Result<QuoteBook, PortfolioError> {
        Ok(self.quotes.clone())
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}
