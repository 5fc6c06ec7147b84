//! Load `Config` from environment variables (optionally seeded from `.env`).

use crate::config::types::{Config, RunMode};
use crate::config::validator::{parse_origin, validate};
use crate::error::ConfigError;
use std::net::{IpAddr, SocketAddr};

pub const ENV_MODE: &str = "APP_ENV";
pub const ENV_CLIENT_ORIGIN: &str = "CLIENT_ORIGIN";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
pub const ENV_API_TOKEN: &str = "API_TOKEN";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";

const DEFAULT_CLIENT_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/unity";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

impl Config {
    /// Read from the process environment. Loads `.env` first if one exists.
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenvy::dotenv().ok();
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mode = match get(ENV_MODE) {
            Some(raw) => raw
                .parse::<RunMode>()
                .map_err(|reason| ConfigError::Invalid { var: ENV_MODE, reason })?,
            None => RunMode::Development,
        };
        let client_origin = parse_origin(&get(ENV_CLIENT_ORIGIN).unwrap_or_else(|| DEFAULT_CLIENT_ORIGIN.into()))?;
        let database_url = get(ENV_DATABASE_URL).unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let database_max_connections = match get(ENV_DATABASE_MAX_CONNECTIONS) {
            Some(raw) => raw.parse::<u32>().map_err(|e| ConfigError::Invalid {
                var: ENV_DATABASE_MAX_CONNECTIONS,
                reason: e.to_string(),
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let api_token = get(ENV_API_TOKEN).ok_or(ConfigError::Missing(ENV_API_TOKEN))?;
        let host: IpAddr = get(ENV_HOST)
            .unwrap_or_else(|| DEFAULT_HOST.into())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid { var: ENV_HOST, reason: e.to_string() })?;
        let port = match get(ENV_PORT) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::Invalid { var: ENV_PORT, reason: e.to_string() })?,
            None => DEFAULT_PORT,
        };

        let config = Config {
            mode,
            client_origin,
            database_url,
            database_max_connections,
            api_token,
            bind_addr: SocketAddr::new(host, port),
        };
        validate(&config)?;
        Ok(config)
    }
}
