//! Server configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::SocketAddr;

use cafe_core::report::parse_timezone;
use cafe_core::DEFAULT_TIMEZONE;
use chrono_tz::Tz;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind (`CAFE_HOST`)
    pub host: String,

    /// HTTP port (`CAFE_PORT`)
    pub port: u16,

    /// SQLite database file (`CAFE_DATABASE_PATH`)
    pub database_path: String,

    /// Pool size (`CAFE_DB_MAX_CONNECTIONS`)
    pub db_max_connections: u32,

    /// Zone that defines "today" and "this month" (`CAFE_TIMEZONE`)
    pub timezone: Tz,

    /// Shown on the status endpoint (`CAFE_SHOP_NAME`)
    pub shop_name: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database_path: "./cafe.db".to_string(),
            db_max_connections: 5,
            timezone: chrono_tz::Asia::Dhaka,
            shop_name: "Coffee Shop".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let port = match lookup("CAFE_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CAFE_PORT".to_string()))?,
            None => defaults.port,
        };

        let db_max_connections = match lookup("CAFE_DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CAFE_DB_MAX_CONNECTIONS".to_string()))?,
            None => defaults.db_max_connections,
        };

        if db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "CAFE_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        let timezone_name = lookup("CAFE_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone = parse_timezone(timezone_name.trim())
            .map_err(|_| ConfigError::UnknownTimezone(timezone_name.clone()))?;

        let config = ApiConfig {
            host: lookup("CAFE_HOST").unwrap_or(defaults.host),
            port,
            database_path: lookup("CAFE_DATABASE_PATH").unwrap_or(defaults.database_path),
            db_max_connections,
            timezone,
            shop_name: lookup("CAFE_SHOP_NAME").unwrap_or(defaults.shop_name),
        };

        if config.database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("CAFE_DATABASE_PATH".to_string()));
        }

        Ok(config)
    }

    /// Socket address to listen on.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("CAFE_HOST".to_string()))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.database_path, "./cafe.db");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.timezone, chrono_tz::Asia::Dhaka);
        assert_eq!(config.shop_name, "Coffee Shop");
        assert_eq!(config.bind_addr().unwrap().port(), 8000);
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("CAFE_HOST", "127.0.0.1"),
            ("CAFE_PORT", "9090"),
            ("CAFE_TIMEZONE", "Europe/London"),
            ("CAFE_SHOP_NAME", "Corner Cafe"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:9090");
        assert_eq!(config.timezone, chrono_tz::Europe::London);
        assert_eq!(config.shop_name, "Corner Cafe");
    }

    #[test]
    fn test_invalid_values() {
        let err = ApiConfig::from_lookup(lookup(&[("CAFE_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == "CAFE_PORT"));

        let err = ApiConfig::from_lookup(lookup(&[("CAFE_TIMEZONE", "Mars/Olympus")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTimezone(_)));

        let err =
            ApiConfig::from_lookup(lookup(&[("CAFE_DB_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }
}
