//! Market quotes and the simulated price refresh.
//!
//! The refresh is a stand-in for a real market-data fetch: it nudges the
//! current market price by a uniform random factor and leaves the
//! fundamentals untouched. Callers supply the random source.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::PortfolioError;
use super::money::{ceil2, floor2, round2};
use crate::ports::quote_port::QuotePort;

/// Default maximum relative move per refresh (2%).
pub const DEFAULT_MAX_FLUCTUATION: f64 = 0.02;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub cmp: f64,
    pub pe_ratio: f64,
    pub latest_earnings: f64,
}

/// Return a copy of `quote` with `cmp` moved by a uniform factor in
/// `[-max_change, +max_change]`.
///
/// The result is rounded to cents but never leaves
/// `[cmp * (1 - max_change), cmp * (1 + max_change)]`; if no cent value fits
/// inside that band the unrounded price is kept.
pub fn perturb_quote<R: Rng + ?Sized>(quote: &Quote, max_change: f64, rng: &mut R) -> Quote {
    if !quote.cmp.is_finite() || !max_change.is_finite() {
        return quote.clone();
    }
    let unit: f64 = rng.gen_range(0.0..1.0);
    let change = (unit - 0.5) * 2.0 * max_change;
    let raw = quote.cmp * (1.0 + change);

    let (low, high) = band(quote.cmp, max_change);
    let (low_cents, high_cents) = (ceil2(low), floor2(high));
    let cmp = if low_cents <= high_cents {
        round2(raw).clamp(low_cents, high_cents)
    } else {
        raw.clamp(low, high)
    };

    Quote {
        cmp,
        ..quote.clone()
    }
}

fn band(cmp: f64, max_change: f64) -> (f64, f64) {
    let a = cmp * (1.0 - max_change);
    let b = cmp * (1.0 + max_change);
    if a <= b { (a, b) } else { (b, a) }
}

/// Quotes keyed by symbol.
///
/// Iteration is ordered by symbol so a seeded refresh is reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteBook {
    quotes: BTreeMap<String, Quote>,
}

impl QuoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, quote: Quote) -> Option<Quote> {
        self.quotes.insert(quote.symbol.clone(), quote)
    }

    pub fn get(&self, symbol: &str) -> Option<&Quote> {
        self.quotes.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.quotes.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quote> {
        self.quotes.values()
    }

    /// A new book with every quote perturbed once.
    pub fn refreshed<R: Rng + ?Sized>(&self, max_change: f64, rng: &mut R) -> QuoteBook {
        self.iter()
            .map(|q| perturb_quote(q, max_change, rng))
            .collect()
    }
}

impl FromIterator<Quote> for QuoteBook {
    fn from_iter<I: IntoIterator<Item = Quote>>(iter: I) -> Self {
        let mut book = QuoteBook::new();
        for quote in iter {
            book.insert(quote);
        }
        book
    }
}

impl QuotePort for QuoteBook {
    fn quote(&self, symbol: &str) -> Result<Quote, PortfolioError> {
        self.get(symbol)
            .cloned()
            .ok_or_else(|| PortfolioError::QuoteNotFound {
                symbol: symbol.to_string(),
            })
    }
}
