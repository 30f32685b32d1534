//! Configuration and portfolio data validation.
//!
//! Config checks run before any settings are resolved; data checks run once
//! holdings and baseline quotes are loaded.

use std::collections::HashSet;
use std::str::FromStr;

use super::error::PortfolioError;
use super::holding::Holding;
use super::settings::LogFormat;
use crate::ports::config_port::ConfigPort;
use crate::ports::quote_port::QuotePort;

pub fn validate_app_config(config: &dyn ConfigPort) -> Result<(), PortfolioError> {
    validate_host(config)?;
    validate_port(config)?;
    validate_refresh_interval(config)?;
    validate_fluctuation(config)?;
    validate_seed(config)?;
    validate_data_paths(config)?;
    validate_log_format(config)?;
    Ok(())
}

/// Parse an optional key, distinguishing "absent" from "present but garbage".
pub fn parse_key<T: FromStr>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<T>, PortfolioError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            PortfolioError::invalid_config(section, key, format!("cannot parse {raw:?}"))
        }),
    }
}

fn validate_host(config: &dyn ConfigPort) -> Result<(), PortfolioError> {
    match config.get_string("server", "host") {
        Some(host) if host.trim().is_empty() => Err(PortfolioError::invalid_config(
            "server",
            "host",
            "host must not be empty",
        )),
        _ => Ok(()),
    }
}

fn validate_port(config: &dyn ConfigPort) -> Result<(), PortfolioError> {
    match parse_key::<i64>(config, "server", "port")? {
        Some(port) if !(1..=65535).contains(&port) => Err(PortfolioError::invalid_config(
            "server",
            "port",
            "port must be between 1 and 65535",
        )),
        _ => Ok(()),
    }
}

fn validate_refresh_interval(config: &dyn ConfigPort) -> Result<(), PortfolioError> {
    match parse_key::<i64>(config, "market", "refresh_interval_secs")? {
        Some(secs) if secs <= 0 => Err(PortfolioError::invalid_config(
            "market",
            "refresh_interval_secs",
            "refresh_interval_secs must be positive",
        )),
        _ => Ok(()),
    }
}

fn validate_fluctuation(config: &dyn ConfigPort) -> Result<(), PortfolioError> {
    match parse_key::<f64>(config, "market", "max_fluctuation_pct")? {
        Some(pct) if !pct.is_finite() || !(0.0..100.0).contains(&pct) => {
            Err(PortfolioError::invalid_config(
                "market",
                "max_fluctuation_pct",
                "max_fluctuation_pct must be at least 0 and below 100",
            ))
        }
        _ => Ok(()),
    }
}

fn validate_seed(config: &dyn ConfigPort) -> Result<(), PortfolioError> {
    parse_key::<u64>(config, "market", "seed").map(|_| ())
}

fn validate_data_paths(config: &dyn ConfigPort) -> Result<(), PortfolioError> {
    let holdings = non_empty(config.get_string("data", "holdings_csv"));
    let quotes = non_empty(config.get_string("data", "quotes_csv"));

    match (holdings, quotes) {
        (Some(_), None) => Err(PortfolioError::ConfigMissing {
            section: "data".to_string(),
            key: "quotes_csv".to_string(),
        }),
        (None, Some(_)) => Err(PortfolioError::ConfigMissing {
            section: "data".to_string(),
            key: "holdings_csv".to_string(),
        }),
        _ => Ok(()),
    }
}

fn validate_log_format(config: &dyn ConfigPort) -> Result<(), PortfolioError> {
    match config.get_string("logging", "format") {
        Some(format) if LogFormat::parse(&format).is_none() => Err(
            PortfolioError::invalid_config("logging", "format", "format must be text or json"),
        ),
        _ => Ok(()),
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Check loaded holdings for consistency and quote coverage.
pub fn validate_holdings(
    holdings: &[Holding],
    quotes: &dyn QuotePort,
) -> Result<(), PortfolioError> {
    let mut seen_ids: HashSet<&str> = HashSet::new();

    for holding in holdings {
        let invalid = |reason: &str| PortfolioError::InvalidHolding {
            id: holding.id.clone(),
            reason: reason.to_string(),
        };

        if holding.id.trim().is_empty() {
            return Err(invalid("id must not be empty"));
        }
        if !seen_ids.insert(holding.id.as_str()) {
            return Err(invalid("duplicate id"));
        }
        if holding.symbol.trim().is_empty() {
            return Err(invalid("symbol must not be empty"));
        }
        if holding.sector.trim().is_empty() {
            return Err(invalid("sector must not be empty"));
        }
        if !holding.purchase_price.is_finite() || holding.purchase_price < 0.0 {
            return Err(invalid("purchase price must be a non-negative number"));
        }

        let quote = quotes.quote(&holding.symbol)?;
        if !quote.cmp.is_finite() || quote.cmp < 0.0 {
            return Err(PortfolioError::data_load(
                "quotes",
                format!("{} has an invalid market price", quote.symbol),
            ));
        }
    }
    Ok(())
}
