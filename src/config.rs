//! Configuration module for authgate.

use serde::Deserialize;
use std::path::Path;

use crate::{AuthGateError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
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
    "data/authgate.db".to_string()
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
    "logs/authgate.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Argon2id cost parameters for password hashing.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordConfig {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Time cost (iterations).
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

fn default_memory_kib() -> u32 {
    65536 // 64 MB
}

fn default_iterations() -> u32 {
    3
}

fn default_parallelism() -> u32 {
    4
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

/// Session cookie configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session id.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the cookie is marked `Secure` (HTTPS only).
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_cookie_name() -> String {
    "authgate_session".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            secure_cookie: false,
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
    /// Password hashing configuration.
    #[serde(default)]
    pub password: PasswordConfig,
    /// Session cookie configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(AuthGateError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| AuthGateError::Config(format!("parse error: {e}")))
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the cookie name is empty or the Argon2
    /// parameters are rejected by the hasher.
    pub fn validate(&self) -> Result<()> {
        if self.session.cookie_name.trim().is_empty() {
            return Err(AuthGateError::Config(
                "session.cookie_name must not be empty".to_string(),
            ));
        }
        crate::auth::Argon2Hasher::from_config(&self.password)
            .map_err(|e| AuthGateError::Config(format!("password: {e}")))?;
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
        assert_eq!(config.server.port, 8080);

        assert_eq!(config.database.path, "data/authgate.db");

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/authgate.log");

        assert_eq!(config.password.memory_kib, 65536);
        assert_eq!(config.password.iterations, 3);
        assert_eq!(config.password.parallelism, 4);

        assert_eq!(config.session.cookie_name, "authgate_session");
        assert!(!config.session.secure_cookie);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 3000

[database]
path = "custom/auth.sqlite"

[logging]
level = "debug"
file = "custom/logs/app.log"

[password]
memory_kib = 19456
iterations = 2
parallelism = 1

[session]
cookie_name = "sid"
secure_cookie = true
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.path, "custom/auth.sqlite");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
        assert_eq!(config.password.memory_kib, 19456);
        assert_eq!(config.password.iterations, 2);
        assert_eq!(config.password.parallelism, 1);
        assert_eq!(config.session.cookie_name, "sid");
        assert!(config.session.secure_cookie);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 9000
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.path, "data/authgate.db");
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.session.cookie_name, "authgate_session");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("[server]\nport = \"not a number\"");
        assert!(matches!(result, Err(AuthGateError::Config(_))));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("/nonexistent/authgate/config.toml");
        assert!(matches!(result, Err(AuthGateError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[database]\npath = \"x.db\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.database.path, "x.db");
    }

    #[test]
    fn test_validate_default() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_cookie_name() {
        let mut config = Config::default();
        config.session.cookie_name = "  ".to_string();
        assert!(matches!(config.validate(), Err(AuthGateError::Config(_))));
    }

    #[test]
    fn test_validate_bad_argon2_params() {
        let mut config = Config::default();
        config.password.parallelism = 0;
        assert!(matches!(config.validate(), Err(AuthGateError::Config(_))));
    }
}
