//! Plain-text portfolio tables for the terminal.
//!
//! Provides:
//! - Summary block (totals, gain/loss, last updated)
//! - One table per sector with its totals
//! - Single quote line

use std::fmt::Write;

use super::currency::{format_inr, format_signed_inr, format_signed_pct};
use crate::domain::holding::EnrichedHolding;
use crate::domain::quote::Quote;
use crate::domain::sector::SectorAggregate;
use crate::domain::summary::PortfolioSummary;

const HEADERS: [&str; 11] = [
    "Particulars",
    "Purchase",
    "Qty",
    "Investment",
    "Port. %",
    "Exch",
    "CMP",
    "Present Value",
    "Gain/Loss",
    "P/E",
    "Earnings",
];

pub fn format_summary(summary: &PortfolioSummary, refresh_secs: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total Investment: {}", format_inr(summary.total_investment));
    let _ = writeln!(out, "Present Value:    {}", format_inr(summary.total_present_value));
    let _ = writeln!(
        out,
        "Total Gain/Loss:  {} ({})",
        format_signed_inr(summary.total_gain_loss),
        format_signed_pct(summary.gain_loss_percentage)
    );
    let _ = writeln!(
        out,
        "Last Updated:     {} (auto-refresh: {}s)",
        summary.last_updated.format("%H:%M:%S"),
        refresh_secs
    );
    out
}

fn row(h: &EnrichedHolding) -> [String; 11] {
    [
        h.holding.name.clone(),
        format_inr(h.holding.purchase_price),
        h.holding.quantity.to_string(),
        format_inr(h.investment),
        format!("{:.2}%", h.portfolio_percentage),
        h.holding.exchange.clone(),
        format!("{:.2}", h.cmp),
        format_inr(h.present_value),
        format_signed_inr(h.gain_loss),
        format!("{:.1}", h.pe_ratio),
        format_inr(h.latest_earnings),
    ]
}

pub fn format_holdings_table(holdings: &[EnrichedHolding]) -> String {
    let rows: Vec<[String; 11]> = holdings.iter().map(row).collect();

    let mut widths: [usize; 11] = HEADERS.map(|h| h.chars().count());
    for r in &rows {
        for (i, cell) in r.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS
        .iter()
        .enumerate()
        .map(|(i, h)| pad(h, widths[i], i == 0))
        .collect();
    let _ = writeln!(out, "{}", header.join("  "));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));

    for r in &rows {
        let cells: Vec<String> = r
            .iter()
            .enumerate()
            .map(|(i, c)| pad(c, widths[i], i == 0 || i == 5))
            .collect();
        let _ = writeln!(out, "{}", cells.join("  "));
    }
    out
}

pub fn format_sector(sector: &SectorAggregate) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "== {} | Investment: {} | Present Value: {} | Gain/Loss: {}",
        sector.sector,
        format_inr(sector.total_investment),
        format_inr(sector.total_present_value),
        format_signed_inr(sector.total_gain_loss)
    );
    out.push_str(&format_holdings_table(&sector.holdings));
    out
}

pub fn format_portfolio(
    summary: &PortfolioSummary,
    sectors: &[SectorAggregate],
    refresh_secs: u64,
) -> String {
    let mut out = format_summary(summary, refresh_secs);
    if sectors.is_empty() {
        out.push_str("\nNo holdings configured\n");
        return out;
    }
    for sector in sectors {
        out.push('\n');
        out.push_str(&format_sector(sector));
    }
    out
}

pub fn format_quote(quote: &Quote, last_updated: &str) -> String {
    format!(
        "{}  CMP {:.2}  P/E {:.1}  Earnings {}  ({})",
        quote.symbol,
        quote.cmp,
        quote.pe_ratio,
        format_inr(quote.latest_earnings),
        last_updated
    )
}

fn pad(cell: &str, width: usize, left: bool) -> String {
    if left {
        format!("{cell:<width$}")
    } else {
        format!("{cell:>width$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::holding::Holding;
    use crate::domain::sector::aggregate_by_sector;
    use chrono::{TimeZone, Utc};

    fn enriched(name: &str, sector: &str, investment: f64, present_value: f64) -> EnrichedHolding {
        EnrichedHolding {
            holding: Holding {
                id: name.to_string(),
                name: name.to_string(),
                symbol: name.to_uppercase(),
                purchase_price: investment / 10.0,
                quantity: 10,
                exchange: "NSE".to_string(),
                sector: sector.to_string(),
            },
            investment,
            portfolio_percentage: 50.0,
            cmp: present_value / 10.0,
            present_value,
            gain_loss: present_value - investment,
            pe_ratio: 20.0,
            latest_earnings: 5_000.0,
        }
    }

    fn summary(holdings: &[EnrichedHolding]) -> PortfolioSummary {
        PortfolioSummary::compute(holdings, Utc.with_ymd_and_hms(2024, 5, 1, 9, 15, 30).unwrap())
    }

    #[test]
    fn summary_block_shows_totals() {
        let holdings = vec![enriched("Wipro Ltd", "Technology", 42_500.0, 41_000.0)];
        let text = format_summary(&summary(&holdings), 15);
        assert!(text.contains("Total Investment: ₹42,500"));
        assert!(text.contains("-₹1,500 (-3.53%)"));
        assert!(text.contains("09:15:30 (auto-refresh: 15s)"));
    }

    #[test]
    fn sector_tables_follow_sector_order() {
        let holdings = vec![
            enriched("HDFC Bank Ltd", "Financials", 72_500.0, 79_000.0),
            enriched("Infosys Ltd", "Technology", 56_800.0, 58_600.0),
        ];
        let sectors = aggregate_by_sector(&holdings);
        let text = format_portfolio(&summary(&holdings), &sectors, 15);

        let fin = text.find("== Financials").unwrap();
        let tech = text.find("== Technology").unwrap();
        assert!(fin < tech);
        assert!(text.contains("Gain/Loss: +₹6,500"));
        assert!(text.contains("HDFC Bank Ltd"));
    }

    #[test]
    fn rows_are_aligned() {
        let holdings = vec![
            enriched("A", "X", 100.0, 110.0),
            enriched("Longer Name Ltd", "X", 1_000_000.0, 900_000.0),
        ];
        let table = format_holdings_table(&holdings);
        let widths: Vec<usize> = table.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn empty_portfolio_says_so() {
        let text = format_portfolio(&summary(&[]), &[], 15);
        assert!(text.contains("No holdings configured"));
    }
}
