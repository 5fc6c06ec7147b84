//! Shared application state for all routes.

use crate::config::Config;
use crate::store::Repository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository>,
    /// Read-only after startup.
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(repo: Arc<dyn Repository>, config: Config) -> Self {
        AppState {
            repo,
            config: Arc::new(config),
        }
    }
}
