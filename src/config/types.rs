//! Runtime configuration types. Built once at startup and shared through `AppState`.

use axum::http::HeaderValue;
use std::net::SocketAddr;

/// Deployment mode. Controls access-log verbosity and how much error detail reaches clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    Production,
    Development,
    Test,
}

impl RunMode {
    pub fn is_production(self) -> bool {
        matches!(self, RunMode::Production)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunMode::Production => "production",
            RunMode::Development => "development",
            RunMode::Test => "test",
        }
    }
}

impl std::str::FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(RunMode::Production),
            "development" | "dev" => Ok(RunMode::Development),
            "test" => Ok(RunMode::Test),
            other => Err(format!("unknown mode '{}' (expected production, development or test)", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub mode: RunMode,
    /// The single origin allowed by the CORS policy.
    pub client_origin: HeaderValue,
    pub database_url: String,
    pub database_max_connections: u32,
    /// Secret every `/api` request must present as `Authorization: Bearer <token>`.
    pub api_token: String,
    pub bind_addr: SocketAddr,
}
