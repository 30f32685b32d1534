//! Web server adapter.
//!
//! JSON API under `/api`, a health probe, and an HTMX dashboard at `/` that
//! re-polls itself every refresh interval.

mod error;
mod handlers;
mod templates;

pub use error::{ApiResponse, WebError};
pub use handlers::*;
pub use templates::*;

use axum::{Router, routing::get};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domain::holding::Holding;
use crate::domain::snapshot::MarketSnapshot;

pub struct AppState {
    pub holdings: Arc<[Holding]>,
    pub market: watch::Receiver<Arc<MarketSnapshot>>,
    pub refresh_interval: Duration,
}

impl AppState {
    /// Latest published snapshot. The borrow is released before returning.
    pub fn current_snapshot(&self) -> Arc<MarketSnapshot> {
        Arc::clone(&self.market.borrow())
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/health", get(handlers::health))
        .route("/api/portfolio", get(handlers::portfolio))
        .route("/api/portfolio/sectors", get(handlers::sectors))
        .route("/api/portfolio/summary", get(handlers::summary))
        .route("/api/stock/{symbol}", get(handlers::stock))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
