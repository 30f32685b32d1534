//! CSV file data adapter.
//!
//! Holdings file columns: `id,particulars,symbol,purchase_price,quantity,exchange,sector`.
//! Quotes file columns: `symbol,cmp,pe_ratio,latest_earnings`.

use crate::domain::error::PortfolioError;
use crate::domain::holding::Holding;
use crate::domain::quote::{Quote, QuoteBook};
use crate::ports::data_port::PortfolioDataPort;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvAdapter {
    holdings_path: PathBuf,
    quotes_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct HoldingRow {
    id: String,
    particulars: String,
    symbol: String,
    purchase_price: f64,
    quantity: u32,
    exchange: String,
    sector: String,
}

#[derive(Debug, Deserialize)]
struct QuoteRow {
    symbol: String,
    cmp: f64,
    pe_ratio: f64,
    latest_earnings: f64,
}

impl CsvAdapter {
    pub fn new(holdings_path: PathBuf, quotes_path: PathBuf) -> Self {
        Self {
            holdings_path,
            quotes_path,
        }
    }

    fn read_rows<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, PortfolioError> {
        let source = path.display().to_string();
        let content = fs::read_to_string(path)
            .map_err(|e| PortfolioError::data_load(&source, format!("read failed: {e}")))?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        rdr.deserialize::<T>()
            .enumerate()
            .map(|(i, row)| {
                // +2: header line, then 1-based numbering
                row.map_err(|e| {
                    PortfolioError::data_load(&source, format!("line {}: {}", i + 2, e))
                })
            })
            .collect()
    }
}

impl PortfolioDataPort for CsvAdapter {
    fn load_holdings(&self) -> Result<Vec<Holding>, PortfolioError> {
        let rows: Vec<HoldingRow> = Self::read_rows(&self.holdings_path)?;
        Ok(rows
            .into_iter()
            .map(|r| Holding {
                id: r.id,
                name: r.particulars,
                symbol: r.symbol,
                purchase_price: r.purchase_price,
                quantity: r.quantity,
                exchange: r.exchange,
                sector: r.sector,
            })
            .collect())
    }

    fn load_quotes(&self) -> Result<QuoteBook, PortfolioError> {
        let rows: Vec<QuoteRow> = Self::read_rows(&self.quotes_path)?;
        let mut book = QuoteBook::new();
        for r in rows {
            let symbol = r.symbol.clone();
            let previous = book.insert(Quote {
                symbol: r.symbol,
                cmp: r.cmp,
                pe_ratio: r.pe_ratio,
                latest_earnings: r.latest_earnings,
            });
            if previous.is_some() {
                return Err(PortfolioError::data_load(
                    self.quotes_path.display().to_string(),
                    format!("duplicate quote for {symbol}"),
                ));
            }
        }
        Ok(book)
    }

    fn describe(&self) -> String {
        format!(
            "csv ({}, {})",
            self.holdings_path.display(),
            self.quotes_path.display()
        )
    }
}
