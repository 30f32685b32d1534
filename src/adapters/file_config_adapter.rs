//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    /// No file: every lookup falls back to its default.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const SAMPLE: &str = r#"
[server]
host = 127.0.0.1
port = 8080

[market]
refresh_interval_secs = 15
max_fluctuation_pct = 2.5

[logging]
format = json
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("server", "host"),
            Some("127.0.0.1".to_string())
        );
        assert_eq!(adapter.get_string("server", "port"), Some("8080".to_string()));
        assert_eq!(
            adapter.get_string("market", "max_fluctuation_pct"),
            Some("2.5".to_string())
        );
        assert_eq!(
            adapter.get_string("logging", "format"),
            Some("json".to_string())
        );
    }

    #[test]
    fn missing_keys_are_none() {
        let adapter = FileConfigAdapter::from_string("[server]\n").unwrap();
        assert_eq!(adapter.get_string("server", "host"), None);
        assert_eq!(adapter.get_string("data", "holdings_csv"), None);
    }

    #[test]
    fn values_are_returned_unparsed() {
        let adapter = FileConfigAdapter::from_string("[server]\nport = http\n").unwrap();
        assert_eq!(adapter.get_string("server", "port"), Some("http".to_string()));
    }

    #[test]
    fn section_and_key_names_are_case_insensitive() {
        let adapter = FileConfigAdapter::from_string("[Server]\nPort = 8080\n").unwrap();
        assert_eq!(adapter.get_string("server", "port"), Some("8080".to_string()));
    }

    #[test]
    fn empty_adapter_has_nothing() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("server", "port"), None);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[data]\nholdings_csv = /srv/holdings.csv\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("data", "holdings_csv"),
            Some("/srv/holdings.csv".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        assert!(FileConfigAdapter::from_file("/nonexistent/path/portfolio.ini").is_err());
    }
}
