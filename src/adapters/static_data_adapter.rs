//! Built-in demo portfolio: eight NSE holdings and their baseline quotes.

use crate::domain::error::PortfolioError;
use crate::domain::holding::Holding;
use crate::domain::quote::{Quote, QuoteBook};
use crate::ports::data_port::PortfolioDataPort;

// (id, particulars, symbol, purchase price, quantity, sector)
const HOLDINGS: [(&str, &str, &str, f64, u32, &str); 8] = [
    ("1", "HDFC Bank Ltd", "HDFCBANK", 1450.0, 50, "Financials"),
    ("2", "Infosys Ltd", "INFY", 1420.0, 40, "Technology"),
    ("3", "Reliance Industries", "RELIANCE", 2450.0, 30, "Energy"),
    ("4", "TCS Ltd", "TCS", 3250.0, 25, "Technology"),
    ("5", "ICICI Bank Ltd", "ICICIBANK", 820.0, 60, "Financials"),
    ("6", "Asian Paints Ltd", "ASIANPAINT", 2850.0, 20, "Consumer Goods"),
    ("7", "Wipro Ltd", "WIPRO", 425.0, 100, "Technology"),
    ("8", "Dr. Reddy's Labs", "DRREDDY", 4850.0, 10, "Healthcare"),
];

// (symbol, cmp, P/E, latest earnings)
const QUOTES: [(&str, f64, f64, f64); 8] = [
    ("HDFCBANK", 1580.0, 18.5, 12_500.0),
    ("INFY", 1465.0, 22.3, 15_200.0),
    ("RELIANCE", 2520.0, 25.6, 18_900.0),
    ("TCS", 3180.0, 28.4, 16_800.0),
    ("ICICIBANK", 875.0, 16.2, 9_800.0),
    ("ASIANPAINT", 2920.0, 65.8, 5_600.0),
    ("WIPRO", 410.0, 19.5, 7_200.0),
    ("DRREDDY", 4920.0, 32.1, 4_500.0),
];

const EXCHANGE: &str = "NSE";

#[derive(Debug, Default, Clone, Copy)]
pub struct StaticDataAdapter;

impl StaticDataAdapter {
    pub fn new() -> Self {
        StaticDataAdapter
    }
}

impl PortfolioDataPort for StaticDataAdapter {
    fn load_holdings(&self) -> Result<Vec<Holding>, PortfolioError> {
        Ok(HOLDINGS
            .iter()
            .map(|&(id, name, symbol, purchase_price, quantity, sector)| Holding {
                id: id.to_string(),
                name: name.to_string(),
                symbol: symbol.to_string(),
                purchase_price,
                quantity,
                exchange: EXCHANGE.to_string(),
                sector: sector.to_string(),
            })
            .collect())
    }

    fn load_quotes(&self) -> Result<QuoteBook, PortfolioError> {
        Ok(QUOTES
            .iter()
            .map(|&(symbol, cmp, pe_ratio, latest_earnings)| Quote {
                symbol: symbol.to_string(),
                cmp,
                pe_ratio,
                latest_earnings,
            })
            .collect())
    }

    fn describe(&self) -> String {
        "built-in demo portfolio".to_string()
    }
}
