//! HTTP error responses for web adapter.

use askama::Template;
use axum::{
    Json,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::error::PortfolioError;

use super::is_htmx_request;

pub const STOCK_NOT_FOUND: &str = "Stock not found";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Uniform JSON envelope: `{ success, data }` or `{ success, error }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Log `err` and hide it behind a generic `message`.
    pub fn internal_from(message: &str, err: PortfolioError) -> Self {
        tracing::error!(error = %err, "{message}");
        Self::internal(message)
    }
}

impl From<PortfolioError> for WebError {
    fn from(err: PortfolioError) -> Self {
        match err {
            PortfolioError::StockNotFound { .. } => Self::not_found(STOCK_NOT_FOUND),
            other => Self::internal_from(INTERNAL_ERROR, other),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::failure(self.message))).into_response()
    }
}

pub fn status_from_error(err: &PortfolioError) -> StatusCode {
    match err {
        PortfolioError::StockNotFound { .. } => StatusCode::NOT_FOUND,
        PortfolioError::QuoteNotFound { .. }
        | PortfolioError::ConfigParse { .. }
        | PortfolioError::ConfigMissing { .. }
        | PortfolioError::ConfigInvalid { .. }
        | PortfolioError::DataLoad { .. }
        | PortfolioError::InvalidHolding { .. }
        | PortfolioError::Internal { .. }
        | PortfolioError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn public_message(err: &PortfolioError, status: StatusCode) -> String {
    if status.is_server_error() {
        INTERNAL_ERROR.to_string()
    } else {
        err.to_string()
    }
}

/// Render a dashboard failure as HTML: a bare fragment for HTMX polls, a
/// full page otherwise. Server-side failures show only a generic message.
pub fn handle_error(err: PortfolioError, headers: &HeaderMap) -> Response {
    tracing::error!(error = %err, "dashboard render failed");
    let status = status_from_error(&err);
    let message = public_message(&err, status);
    let template = super::templates::ErrorTemplate {
        message: &message,
        status: status.as_u16(),
    };

    let content = match template.render() {
        Ok(html) => html,
        Err(_) => template.fragment(),
    };

    if is_htmx_request(headers) {
        (status, Html(content)).into_response()
    } else {
        super::templates::render_page("Error", &content)
            .map(|html| (status, Html(html)).into_response())
            .unwrap_or_else(|_| (status, content).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_not_found_maps_to_404_with_fixed_message() {
        let err = WebError::from(PortfolioError::StockNotFound {
            symbol: "ZZZZ".into(),
        });
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Stock not found");
    }

    #[test]
    fn other_errors_are_generic_500s() {
        let err = WebError::from(PortfolioError::QuoteNotFound {
            symbol: "ZZZZ".into(),
        });
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn html_errors_hide_internal_detail() {
        let err = PortfolioError::QuoteNotFound {
            symbol: "NOPE".into(),
        };
        let status = status_from_error(&err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(public_message(&err, status), "Internal server error");

        let missing = PortfolioError::StockNotFound {
            symbol: "ZZZZ".into(),
        };
        let status = status_from_error(&missing);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(public_message(&missing, status).contains("ZZZZ"));
    }

    #[test]
    fn envelope_omits_absent_fields() {
        let ok = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(ok, serde_json::json!({ "success": true, "data": [1, 2] }));

        let failed = serde_json::to_value(ApiResponse::failure("boom")).unwrap();
        assert_eq!(
            failed,
            serde_json::json!({ "success": false, "error": "boom" })
        );
    }
}
