use std::path::PathBuf;

use hearth_core::catalog::Catalog;
use hearth_core::compatibility::RuleTable;
use hearth_core::error::ConfigError;

use crate::auth::jwt::JwtConfig;

/// Default minimum password length for registration.
const DEFAULT_PASSWORD_MIN_LENGTH: usize = 6;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Minimum accepted password length at registration (default: `6`).
    pub password_min_length: usize,
    /// JSON price list replacing the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    /// JSON rule table replacing the built-in rules.
    pub rules_path: Option<PathBuf>,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `PASSWORD_MIN_LENGTH`  | `6`                        |
    /// | `CATALOG_PATH`         | built-in catalog           |
    /// | `RULES_PATH`           | built-in rule table        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let password_min_length: usize = std::env::var("PASSWORD_MIN_LENGTH")
            .unwrap_or_else(|_| DEFAULT_PASSWORD_MIN_LENGTH.to_string())
            .parse()
            .expect("PASSWORD_MIN_LENGTH must be a valid usize");

        let optional_path = |key: &str| {
            std::env::var(key)
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            password_min_length,
            catalog_path: optional_path("CATALOG_PATH"),
            rules_path: optional_path("RULES_PATH"),
            jwt,
        }
    }

    /// The catalog at `catalog_path`, or the built-in one.
    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path),
            None => Catalog::standard(),
        }
    }

    /// The rule table at `rules_path`, or the built-in one.
    pub fn load_rules(&self) -> Result<RuleTable, ConfigError> {
        match &self.rules_path {
            Some(path) => RuleTable::load(path),
            None => RuleTable::standard(),
        }
    }
}
