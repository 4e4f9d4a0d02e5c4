//! Application configuration loaded from environment variables.
//!
//! Fail-fast: required variables must be present and valid or the process
//! exits with a clear error message before binding any port.

use std::env;
use thiserror::Error;

/// Default HTTP port.
const DEFAULT_PORT: u16 = 3001;

/// Default database pool size.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info,hauskern=debug";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// An environment variable holds an unparseable value.
    #[error("Invalid value for {name}: {value}")]
    InvalidVar {
        /// Variable name.
        name: &'static str,
        /// The raw value found.
        value: String,
    },
}

/// Runtime configuration for the hauskern API process.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HTTP listen port.
    pub port: u16,
    /// Database pool size.
    pub max_connections: u32,
    /// API key for the document extraction collaborator. Extraction answers
    /// 503 when unset.
    pub openai_api_key: Option<String>,
    /// Override for the extraction endpoint base URL.
    pub openai_base_url: Option<String>,
    /// Log filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is missing or a numeric
    /// variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let port = parse_or_default("PORT", DEFAULT_PORT)?;
        let max_connections = parse_or_default("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        Ok(Self {
            database_url,
            port,
            max_connections,
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_base_url: env::var("OPENAI_BASE_URL").ok().filter(|u| !u.is_empty()),
            log_filter: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

/// Parse an optional environment variable, falling back to a default.
fn parse_or_default<T: std::str::FromStr>(
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidVar { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_falls_back_to_default() {
        let port: u16 = parse_or_default("HAUSKERN_TEST_UNSET_PORT", 4242).unwrap();
        assert_eq!(port, 4242);
    }

    #[test]
    fn invalid_value_is_reported_with_name_and_value() {
        env::set_var("HAUSKERN_TEST_BAD_PORT", "not-a-port");
        let err = parse_or_default::<u16>("HAUSKERN_TEST_BAD_PORT", 0).unwrap_err();
        match err {
            ConfigError::InvalidVar { name, value } => {
                assert_eq!(name, "HAUSKERN_TEST_BAD_PORT");
                assert_eq!(value, "not-a-port");
            }
            other => panic!("expected InvalidVar, got {other:?}"),
        }
        env::remove_var("HAUSKERN_TEST_BAD_PORT");
    }
}
