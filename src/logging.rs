//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over the configured level; `LOG_FORMAT=json` wins over the
//! configured format. Output goes to stderr so stdout stays clean for tables.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::domain::settings::LogFormat;

pub fn resolve_format(configured: LogFormat, env_value: Option<&str>) -> LogFormat {
    env_value
        .and_then(LogFormat::parse)
        .unwrap_or(configured)
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_tracing(level: &str, format: LogFormat) {
    let format = resolve_format(format, std::env::var("LOG_FORMAT").ok().as_deref());
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_configured_format() {
        assert_eq!(resolve_format(LogFormat::Text, Some("json")), LogFormat::Json);
        assert_eq!(resolve_format(LogFormat::Json, Some("text")), LogFormat::Text);
    }

    #[test]
    fn unknown_env_value_keeps_configured_format() {
        assert_eq!(resolve_format(LogFormat::Json, Some("yaml")), LogFormat::Json);
        assert_eq!(resolve_format(LogFormat::Text, None), LogFormat::Text);
    }
}
