//! Config validation: values that parse but cannot work at runtime are rejected at startup.

use crate::config::loader::{ENV_API_TOKEN, ENV_CLIENT_ORIGIN, ENV_DATABASE_MAX_CONNECTIONS, ENV_DATABASE_URL};
use crate::config::types::Config;
use crate::error::ConfigError;
use axum::http::HeaderValue;

/// An origin is `scheme://host[:port]` with no path, usable as an `Access-Control-Allow-Origin` value.
pub fn parse_origin(raw: &str) -> Result<HeaderValue, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        var: ENV_CLIENT_ORIGIN,
        reason: format!("{}: {}", reason, raw),
    };
    let rest = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .ok_or_else(|| invalid("origin must start with http:// or https://"))?;
    if rest.is_empty() || rest.contains('/') {
        return Err(invalid("origin must be scheme://host[:port]"));
    }
    HeaderValue::from_str(raw).map_err(|_| invalid("origin is not a valid header value"))
}

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.api_token.chars().any(char::is_whitespace) {
        return Err(ConfigError::Invalid {
            var: ENV_API_TOKEN,
            reason: "token must not contain whitespace".into(),
        });
    }
    if !(config.database_url.starts_with("postgres://") || config.database_url.starts_with("postgresql://")) {
        return Err(ConfigError::Invalid {
            var: ENV_DATABASE_URL,
            reason: "expected a postgres:// URL".into(),
        });
    }
    if config.database_max_connections == 0 {
        return Err(ConfigError::Invalid {
            var: ENV_DATABASE_MAX_CONNECTIONS,
            reason: "pool needs at least one connection".into(),
        });
    }
    Ok(())
}
