//! Unity API server: reads configuration from the environment (and `.env`), prepares the database,
//! and serves the API until Ctrl-C / SIGTERM.
//!
//! Run from repo root: `cargo run -p unity-server`

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use unity_api::{app, apply_migrations, ensure_database_exists, AppState, Config, PgRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(&config);

    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    apply_migrations(&pool).await?;

    let bind_addr = config.bind_addr;
    let mode = config.mode;
    let state = AppState::new(Arc::new(PgRepository::new(pool)), config);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(mode = mode.as_str(), "listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("unity_api=info,unity_server=info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.mode.is_production() {
        builder.compact().init();
    } else {
        builder.pretty().init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
