//! Public routes outside `/api`: greeting, liveness, readiness, build info.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

/// Probe answer. `database` is only reported by the readiness probe.
#[derive(Serialize)]
struct Probe {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

impl Probe {
    fn up() -> Self {
        Probe { status: "ok", database: None }
    }
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

async fn hello() -> &'static str {
    "Hello, world!"
}

async fn live() -> Json<Probe> {
    Json(Probe::up())
}

/// 503 while the repository cannot answer a ping.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Probe>) {
    match state.repo.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(Probe {
                database: Some("ok"),
                ..Probe::up()
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "repository not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Probe {
                    status: "degraded",
                    database: Some("unavailable"),
                }),
            )
        }
    }
}

async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn common_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(live))
        .route("/ready", get(ready))
        .route("/version", get(build_info))
}
