use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE: &str = "catalog.db";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Settings read from an optional TOML file. Command line flags take precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub log_level: String,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub database: String,
    pub cors_origin: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.to_string(),
            cors_origin: None,
        }
    }
}

impl CatalogConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse catalog config")
    }

    /// Load the config file, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Self::from_toml_str(&content)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply command line overrides on top of the file values.
    pub fn with_overrides(
        mut self,
        port: Option<u16>,
        database: Option<String>,
        cors_origin: Option<String>,
    ) -> Self {
        if let Some(port) = port {
            self.server.port = port;
        }
        if let Some(database) = database {
            self.server.database = database;
        }
        if cors_origin.is_some() {
            self.server.cors_origin = cors_origin;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.database, "catalog.db");
        assert_eq!(config.log_level, "info");
        assert!(config.server.cors_origin.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = CatalogConfig::from_toml_str(
            r#"
            [server]
            port = 8080
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.database, "catalog.db");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_cli_overrides_file() {
        let config = CatalogConfig::from_toml_str(
            r#"
            log_level = "debug"

            [server]
            port = 8080
            database = "shop.db"
            cors_origin = "http://localhost:5173"
            "#,
        )
        .unwrap()
        .with_overrides(Some(9000), None, None);

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.database, "shop.db");
        assert_eq!(
            config.server.cors_origin.as_deref(),
            Some("http://localhost:5173")
        );
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\ndatabase = \":memory:\"").unwrap();

        let config = CatalogConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.database, ":memory:");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = CatalogConfig::load(Some(Path::new("/nonexistent/catalog.toml")));
        assert!(result.is_err());
    }
}
