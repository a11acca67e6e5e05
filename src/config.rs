//! Configuration module for the microblog service.

use serde::Deserialize;
use std::path::Path;

use crate::{MicroblogError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins (empty = any origin, no credentials).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/microblog.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/microblog.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Minimum password length in characters.
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2 time cost (iterations).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2 parallelism (lanes).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
    /// Emails of accounts promoted to admin at startup.
    #[serde(default)]
    pub admin_emails: Vec<String>,
}

fn default_min_password_length() -> usize {
    6
}

fn default_argon2_memory() -> u32 {
    19456 // 19 MiB
}

fn default_argon2_iterations() -> u32 {
    2
}

fn default_argon2_parallelism() -> u32 {
    1
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: default_min_password_length(),
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            admin_emails: vec![],
        }
    }
}

/// Pagination configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    /// Items per page for user listings, profiles and feeds.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_per_page() -> u32 {
    30
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Pagination configuration.
    #[serde(default)]
    pub pagination: PaginationConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(MicroblogError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| MicroblogError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `MICROBLOG_DATABASE_PATH`: Override the database file path
    /// - `MICROBLOG_LOG_LEVEL`: Override the log level
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("MICROBLOG_DATABASE_PATH") {
            if !path.is_empty() {
                self.database.path = path;
            }
        }
        if let Ok(level) = std::env::var("MICROBLOG_LOG_LEVEL") {
            if !level.is_empty() {
                self.logging.level = level;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.auth.min_password_length == 0 {
            return Err(MicroblogError::Config(
                "auth.min_password_length must be at least 1".to_string(),
            ));
        }
        if self.pagination.per_page == 0 {
            return Err(MicroblogError::Config(
                "pagination.per_page must be at least 1".to_string(),
            ));
        }
        if self.auth.argon2_iterations == 0 || self.auth.argon2_parallelism == 0 {
            return Err(MicroblogError::Config(
                "auth.argon2_iterations and auth.argon2_parallelism must be at least 1"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.server.cors_origins.is_empty());

        assert_eq!(config.database.path, "data/microblog.db");

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/microblog.log");

        assert_eq!(config.auth.min_password_length, 6);
        assert_eq!(config.auth.argon2_memory_kib, 19456);
        assert_eq!(config.auth.argon2_iterations, 2);
        assert_eq!(config.auth.argon2_parallelism, 1);
        assert!(config.auth.admin_emails.is_empty());

        assert_eq!(config.pagination.per_page, 30);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080
cors_origins = ["http://localhost:5173"]

[database]
path = "custom/db.sqlite"

[logging]
level = "debug"
file = "custom/logs/app.log"

[auth]
min_password_length = 10
argon2_memory_kib = 8192
argon2_iterations = 3
argon2_parallelism = 2
admin_emails = ["root@example.com"]

[pagination]
per_page = 15
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.database.path, "custom/db.sqlite");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
        assert_eq!(config.auth.min_password_length, 10);
        assert_eq!(config.auth.argon2_memory_kib, 8192);
        assert_eq!(config.auth.argon2_iterations, 3);
        assert_eq!(config.auth.argon2_parallelism, 2);
        assert_eq!(config.auth.admin_emails, vec!["root@example.com"]);
        assert_eq!(config.pagination.per_page, 15);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 9999
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.min_password_length, 6);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.pagination.per_page, 30);
    }

    #[test]
    fn test_parse_invalid_config() {
        let toml = "this is not valid toml [[[";
        let result = Config::parse(toml);

        assert!(result.is_err());
        if let Err(MicroblogError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");

        assert!(result.is_err());
        assert!(matches!(result, Err(MicroblogError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[pagination]\nper_page = 5\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.pagination.per_page, 5);
    }

    #[test]
    fn test_apply_env_overrides() {
        let original_db = std::env::var("MICROBLOG_DATABASE_PATH").ok();
        let original_level = std::env::var("MICROBLOG_LOG_LEVEL").ok();

        std::env::set_var("MICROBLOG_DATABASE_PATH", "/tmp/override.db");
        std::env::set_var("MICROBLOG_LOG_LEVEL", "");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.database.path, "/tmp/override.db");
        // Empty values never override
        assert_eq!(config.logging.level, "info");

        match original_db {
            Some(val) => std::env::set_var("MICROBLOG_DATABASE_PATH", val),
            None => std::env::remove_var("MICROBLOG_DATABASE_PATH"),
        }
        match original_level {
            Some(val) => std::env::set_var("MICROBLOG_LOG_LEVEL", val),
            None => std::env::remove_var("MICROBLOG_LOG_LEVEL"),
        }
    }

    #[test]
    fn test_validate_default() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_per_page() {
        let mut config = Config::default();
        config.pagination.per_page = 0;

        let result = config.validate();
        assert!(matches!(result, Err(MicroblogError::Config(msg)) if msg.contains("per_page")));
    }

    #[test]
    fn test_validate_zero_password_length() {
        let mut config = Config::default();
        config.auth.min_password_length = 0;

        assert!(config.validate().is_err());
    }
}
