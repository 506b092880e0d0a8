//! Configuration module
//!
//! Application settings loaded from a TOML file
//! (`~/.config/admin-console/config.toml` by default, overridable via
//! the `ADMIN_CONSOLE_CONFIG` environment variable). Every field has a
//! default so a missing or partial file still yields a usable config.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub logging: LoggingConfig,
    pub admin: AdminConfig,
    pub paging: PagingConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}

/// Default config location: `~/.config/admin-console/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("admin-console")
        .join("config.toml")
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests during shutdown.
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Path of the SQLite database file. Ignored when `url` is set.
    pub path: String,
    /// Full connection URL override.
    pub url: Option<String>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "./admin-console.db".to_string(),
            url: None,
        }
    }
}

impl DatabaseSettings {
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("sqlite://{}?mode=rwc", self.path),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Credentials for the admin account created on an empty database.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            email: "test@test.com".to_string(),
            password: "test".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Rows per page when the request does not specify one.
    pub page_size: u32,
    /// Sizes offered in the page-size selector.
    pub page_sizes: Vec<u32>,
    /// Maximum number of numbered buttons in the pager.
    pub buttons_to_show: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_sizes: vec![5, 10, 25, 50],
            buttons_to_show: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_empty() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.connection_url(), "sqlite://./admin-console.db?mode=rwc");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.admin.username, "admin");
        assert_eq!(cfg.paging.page_size, 10);
        assert_eq!(cfg.paging.page_sizes, vec![5, 10, 25, 50]);
    }

    #[test]
    fn partial_file_overrides_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9090

            [database]
            url = "sqlite::memory:"

            [paging]
            page_size = 25
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.database.connection_url(), "sqlite::memory:");
        assert_eq!(cfg.paging.page_size, 25);
        assert_eq!(cfg.paging.buttons_to_show, 5);
    }

    #[test]
    fn shutdown_timeout_defaults_and_overrides() {
        assert_eq!(AppConfig::default().server.shutdown_timeout, 30);

        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            shutdown_timeout = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.shutdown_timeout, 5);
    }

    #[test]
    fn server_address_formatting() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.address(), "127.0.0.1:8080");
    }
}
