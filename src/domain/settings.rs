//! Resolved runtime settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::quote::DEFAULT_MAX_FLUCTUATION;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_REFRESH_SECS: u64 = 15;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<LogFormat> {
        match value.trim().to_lowercase().as_str() {
            "text" | "pretty" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Where holdings and baseline quotes are read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DataSource {
    /// The bundled demo portfolio.
    #[default]
    BuiltIn,
    Csv { holdings: PathBuf, quotes: PathBuf },
}

impl DataSource {
    /// Anchor relative CSV paths at `base`. Absolute paths are kept.
    pub fn relative_to(self, base: &Path) -> Self {
        match self {
            DataSource::Csv { holdings, quotes } => DataSource::Csv {
                holdings: base.join(holdings),
                quotes: base.join(quotes),
            },
            DataSource::BuiltIn => DataSource::BuiltIn,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub refresh_interval: Duration,
    /// Maximum relative price move per refresh, as a fraction.
    pub max_fluctuation: f64,
    pub seed: Option<u64>,
    pub data_source: DataSource,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            max_fluctuation: DEFAULT_MAX_FLUCTUATION,
            seed: None,
            data_source: DataSource::BuiltIn,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
