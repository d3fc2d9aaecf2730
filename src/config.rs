//! Runtime settings read from the environment (`.env` is loaded by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Postgres URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Create the database named in `database_url` when it does not exist.
    pub create_database: bool,
    pub body_limit_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(AppConfig {
            bind_addr: parse_or("BIND_ADDR", get("BIND_ADDR"), DEFAULT_BIND_ADDR.parse().ok())?,
            database_url: get("DATABASE_URL"),
            max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), Some(DEFAULT_MAX_CONNECTIONS))?,
            create_database: parse_bool("DB_CREATE_DATABASE", get("DB_CREATE_DATABASE"), true)?,
            body_limit_bytes: parse_or("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"), Some(DEFAULT_BODY_LIMIT_BYTES))?,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: Option<T>) -> Result<T, ConfigError> {
    match raw {
        Some(value) => match value.parse() {
            Ok(parsed) => Ok(parsed),
            Err(_) => Err(ConfigError::Invalid { key, value }),
        },
        None => default.ok_or(ConfigError::Invalid { key, value: String::new() }),
    }
}

fn parse_bool(key: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = raw else {
        return Ok(default);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_select_memory_store() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert!(config.database_url.is_none());
        assert_eq!(config.max_connections, 5);
        assert!(config.create_database);
        assert_eq!(config.body_limit_bytes, 1024 * 1024);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("DB_CREATE_DATABASE", "off"),
            ("BODY_LIMIT_BYTES", "2048"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/shop"));
        assert_eq!(config.max_connections, 12);
        assert!(!config.create_database);
        assert_eq!(config.body_limit_bytes, 2048);
    }

    #[test]
    fn blank_database_url_is_unset() {
        let config = config_from(&[("DATABASE_URL", "   ")]).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn rejects_bad_values() {
        let err = config_from(&[("DB_MAX_CONNECTIONS", "many")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", .. }));

        let err = config_from(&[("DB_CREATE_DATABASE", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_CREATE_DATABASE", .. }));
    }
}
