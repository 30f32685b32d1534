//! HTTP request handlers for web adapter.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::error::PortfolioError;
use crate::domain::holding::EnrichedHolding;
use crate::domain::sector::{aggregate_by_sector, sector_names};
use crate::domain::snapshot::{MarketSnapshot, iso_timestamp};
use crate::domain::summary::{PortfolioReport, PortfolioSummary};
use crate::domain::valuation::enrich_holdings;
use crate::ports::quote_port::QuotePort;

use super::error::handle_error;
use super::templates::{DashboardView, render_page};
use super::{ApiResponse, AppState, WebError, is_htmx_request};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub symbol: String,
    pub cmp: f64,
    pub pe_ratio: f64,
    pub latest_earnings: f64,
    pub last_updated: String,
}

#[derive(Debug, Serialize)]
pub struct SectorList {
    pub sectors: Vec<String>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: iso_timestamp(Utc::now()),
    })
}

pub async fn portfolio(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<EnrichedHolding>>>, WebError> {
    let snapshot = state.current_snapshot();
    let holdings = enrich_holdings(&state.holdings, &snapshot.quotes)
        .map_err(|e| WebError::internal_from("Failed to fetch portfolio data", e))?;
    Ok(Json(ApiResponse::ok(holdings)))
}

/// Look up one symbol in the current snapshot. Symbols match exactly.
pub fn lookup_stock(snapshot: &MarketSnapshot, symbol: &str) -> Result<StockQuote, PortfolioError> {
    let quote = snapshot.quotes.quote(symbol).map_err(|e| match e {
        PortfolioError::QuoteNotFound { symbol } => PortfolioError::StockNotFound { symbol },
        other => other,
    })?;
    Ok(StockQuote {
        symbol: quote.symbol,
        cmp: quote.cmp,
        pe_ratio: quote.pe_ratio,
        latest_earnings: quote.latest_earnings,
        last_updated: snapshot.timestamp(),
    })
}

pub async fn stock(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<StockQuote>>, WebError> {
    let snapshot = state.current_snapshot();
    match lookup_stock(&snapshot, &symbol) {
        Ok(quote) => Ok(Json(ApiResponse::ok(quote))),
        Err(e @ PortfolioError::StockNotFound { .. }) => {
            tracing::debug!(%symbol, "stock lookup miss");
            Err(e.into())
        }
        Err(e) => Err(WebError::internal_from("Failed to fetch stock data", e)),
    }
}

pub async fn sectors(State(state): State<Arc<AppState>>) -> Json<ApiResponse<SectorList>> {
    Json(ApiResponse::ok(SectorList {
        sectors: sector_names(&state.holdings),
    }))
}

fn build_report(state: &AppState) -> Result<PortfolioReport, PortfolioError> {
    let snapshot = state.current_snapshot();
    let holdings = enrich_holdings(&state.holdings, &snapshot.quotes)?;
    Ok(PortfolioReport {
        summary: PortfolioSummary::compute(&holdings, snapshot.as_of),
        sectors: aggregate_by_sector(&holdings),
    })
}

pub async fn summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<PortfolioReport>>, WebError> {
    let report = build_report(&state)
        .map_err(|e| WebError::internal_from("Failed to fetch portfolio summary", e))?;
    Ok(Json(ApiResponse::ok(report)))
}

pub async fn dashboard(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let report = match build_report(&state) {
        Ok(r) => r,
        Err(e) => return handle_error(e, &headers),
    };

    let view = DashboardView {
        summary: &report.summary,
        sectors: &report.sectors,
        refresh_secs: state.refresh_interval.as_secs().max(1),
    };
    let fragment = view.fragment();

    if is_htmx_request(&headers) {
        return Html(fragment).into_response();
    }
    match render_page("Portfolio Dashboard", &fragment) {
        Ok(html) => Html(html).into_response(),
        Err(e) => handle_error(
            PortfolioError::Internal {
                reason: format!("template render failed: {e}"),
            },
            &headers,
        ),
    }
}

pub async fn not_found() -> WebError {
    WebError::not_found("Not found")
}
