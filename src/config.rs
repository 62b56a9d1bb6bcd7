//! Configuration management for Bookshelf server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON document holding the whole catalog
    pub path: PathBuf,
    /// Write the document indented (human readable)
    pub pretty: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Same as [`AppConfig::load`], reading the configuration files from `dir`
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let file = |name: &str| File::from(dir.join(name)).required(false);

        let config = Config::builder()
            // Start with default configuration
            .add_source(file("default"))
            // Layer on the environment-specific file
            .add_source(file(run_mode.as_str()))
            // Add environment variables (with prefix BOOKSHELF_)
            .add_source(
                Environment::with_prefix("BOOKSHELF")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override data file location from LIBRARY_FILE env var if present
            .set_override_option("storage.path", env::var("LIBRARY_FILE").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("library.json"),
            pretty: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_environment_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config");

        env::set_var("LIBRARY_FILE", "/tmp/shelf/library.json");
        let config = AppConfig::load_from(&missing);
        env::remove_var("LIBRARY_FILE");
        let config = config.unwrap();
        assert_eq!(config.storage.path, PathBuf::from("/tmp/shelf/library.json"));
        assert!(config.storage.pretty);
        assert_eq!(config.server.port, 3000);

        env::set_var("BOOKSHELF_SERVER_PORT", "8081");
        let config = AppConfig::load_from(&missing);
        env::remove_var("BOOKSHELF_SERVER_PORT");
        let config = config.unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.path, PathBuf::from("library.json"));
    }
}
