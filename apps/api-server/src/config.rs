//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::auth::JwtConfigError;
use quill_infra::{DatabaseConfig, JwtConfig, RuntimeMode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Jwt(#[from] JwtConfigError),

    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mode: RuntimeMode,
    pub jwt: JwtConfig,
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = RuntimeMode::parse(lookup("RUST_ENV").as_deref());
        let jwt = JwtConfig::resolve(lookup("JWT_SECRET"), lookup("JWT_ISSUER"), mode)?;

        let database = match lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 20)?,
                min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 2)?,
            }),
            None => None,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            mode,
            jwt,
            database,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_in_development() {
        let config = AppConfig::from_lookup(lookup_from(&[("RUST_ENV", "development")])).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.mode, RuntimeMode::Development);
        assert!(config.database.is_none());
        assert_eq!(config.jwt.issuer, "quill-api");
    }

    #[test]
    fn test_production_requires_secret() {
        let result = AppConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::Jwt(_))));

        let config = AppConfig::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.mode, RuntimeMode::Production);
        assert_eq!(config.jwt.secret, "s3cret");
    }

    #[test]
    fn test_database_settings() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("RUST_ENV", "test"),
            ("DATABASE_URL", "postgres://localhost/quill"),
            ("DB_MAX_CONNECTIONS", "50"),
        ]))
        .unwrap();

        let db = config.database.expect("database configured");
        assert_eq!(db.url, "postgres://localhost/quill");
        assert_eq!(db.max_connections, 50);
        assert_eq!(db.min_connections, 2);
    }

    #[test]
    fn test_invalid_port() {
        let result = AppConfig::from_lookup(lookup_from(&[("RUST_ENV", "test"), ("PORT", "http")]));
        assert!(matches!(result, Err(ConfigError::Invalid { key: "PORT", .. })));
    }
}
