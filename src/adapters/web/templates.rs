//! HTML templates using Askama.

use askama::Template;

use crate::adapters::currency::{format_inr, format_signed_inr, format_signed_pct};
use crate::domain::holding::EnrichedHolding;
use crate::domain::sector::SectorAggregate;
use crate::domain::summary::PortfolioSummary;

#[derive(Template)]
#[template(path = "base.html")]
pub struct PageTemplate<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

/// Wrap a fragment in the full page layout.
pub fn render_page(title: &str, content: &str) -> Result<String, askama::Error> {
    PageTemplate { title, content }.render()
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}

impl<'a> ErrorTemplate<'a> {
    pub fn fragment(&self) -> String {
        format!(
            "<div id=\"error\" class=\"error\"><h1>Error {}</h1><p>{}</p></div>",
            self.status,
            escape_html(self.message)
        )
    }
}

/// The dashboard body: summary cards and one table per sector.
///
/// The outer `#content` element re-requests `/` every refresh interval and
/// swaps itself out. A failed poll swaps nothing, so the last good render
/// stays on screen.
pub struct DashboardView<'a> {
    pub summary: &'a PortfolioSummary,
    pub sectors: &'a [SectorAggregate],
    pub refresh_secs: u64,
}

impl<'a> DashboardView<'a> {
    pub fn fragment(&self) -> String {
        let mut html = format!(
            "<div id=\"content\" hx-get=\"/\" hx-trigger=\"every {}s\" hx-swap=\"outerHTML\">",
            self.refresh_secs
        );
        html.push_str("<h1>Portfolio Dashboard</h1>");
        html.push_str(&self.summary_cards());

        if self.sectors.is_empty() {
            html.push_str("<p>No holdings configured</p>");
        }
        for sector in self.sectors {
            html.push_str(&sector_card(sector));
        }

        html.push_str("</div>");
        html
    }

    fn summary_cards(&self) -> String {
        let s = self.summary;
        let tone = tone(s.total_gain_loss);
        let mut html = String::from("<div class=\"cards\">");
        html.push_str(&format!(
            "<div class=\"card\"><div class=\"label\">Total Investment</div><div class=\"value\">{}</div></div>",
            format_inr(s.total_investment)
        ));
        html.push_str(&format!(
            "<div class=\"card\"><div class=\"label\">Present Value</div><div class=\"value\">{}</div></div>",
            format_inr(s.total_present_value)
        ));
        html.push_str(&format!(
            "<div class=\"card\"><div class=\"label\">Total Gain/Loss</div><div class=\"value {tone}\">{}</div><div class=\"{tone}\">{}</div></div>",
            format_signed_inr(s.total_gain_loss),
            format_signed_pct(s.gain_loss_percentage)
        ));
        html.push_str(&format!(
            "<div class=\"card\"><div class=\"label\">Last Updated</div><div class=\"value\">{}</div><div class=\"hint\">Auto-refresh: {}s</div></div>",
            s.last_updated.format("%H:%M:%S"),
            self.refresh_secs
        ));
        html.push_str("</div>");
        html
    }
}

fn sector_card(sector: &SectorAggregate) -> String {
    let mut html = String::from("<section class=\"sector\">");
    html.push_str(&format!(
        "<header><h2>{}</h2><span>Investment: <strong>{}</strong></span><span>Present Value: <strong>{}</strong></span><span>Gain/Loss: <strong class=\"{}\">{}</strong></span></header>",
        escape_html(&sector.sector),
        format_inr(sector.total_investment),
        format_inr(sector.total_present_value),
        tone(sector.total_gain_loss),
        format_signed_inr(sector.total_gain_loss)
    ));
    html.push_str(&holdings_table(&sector.holdings));
    html.push_str("</section>");
    html
}

fn holdings_table(holdings: &[EnrichedHolding]) -> String {
    let mut html = String::from("<table>");
    html.push_str(
        "<tr><th>Particulars</th><th>Purchase Price</th><th>Qty</th><th>Investment</th><th>Portfolio %</th><th>Exchange</th><th>CMP</th><th>Present Value</th><th>Gain/Loss</th><th>P/E Ratio</th><th>Latest Earnings</th></tr>",
    );
    for h in holdings {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}%</td><td>{}</td><td>{:.2}</td><td>{}</td><td class=\"{}\">{}</td><td>{:.1}</td><td>{}</td></tr>",
            escape_html(&h.holding.name),
            format_inr(h.holding.purchase_price),
            h.holding.quantity,
            format_inr(h.investment),
            h.portfolio_percentage,
            escape_html(&h.holding.exchange),
            h.cmp,
            format_inr(h.present_value),
            tone(h.gain_loss),
            format_signed_inr(h.gain_loss),
            h.pe_ratio,
            format_inr(h.latest_earnings)
        ));
    }
    html.push_str("</table>");
    html
}

fn tone(value: f64) -> &'static str {
    if value >= 0.0 { "gain" } else { "loss" }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("Dr. Reddy's <Labs> & Co"), "Dr. Reddy&#39;s &lt;Labs&gt; &amp; Co");
    }

    #[test]
    fn error_fragment_escapes_message() {
        let t = ErrorTemplate {
            message: "<script>",
            status: 500,
        };
        assert!(t.fragment().contains("&lt;script&gt;"));
    }

    #[test]
    fn page_wraps_content() {
        let html = render_page("Portfolio", "<div id=\"content\"></div>").unwrap();
        assert!(html.contains("<title>Portfolio</title>"));
        assert!(html.contains("<div id=\"content\"></div>"));
        assert!(html.contains("htmx"));
    }
}
