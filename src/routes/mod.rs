//! Route assembly: public common routes, the authenticated `/api` tree, and the request pipeline.

mod common;
mod resource;

pub use common::common_routes;
pub use resource::resource_routes;

use crate::middleware::{
    access_log, cors_layer, panic_response, require_bearer, security_headers, translate_errors,
};
use crate::model::{Expense, Guest, Wedding};
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, middleware, Router};
use tower_http::catch_panic::CatchPanicLayer;

/// JSON bodies above this size are rejected with 413 and the usual error envelope.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// `/weddings`, `/guests`, `/expenses` behind the bearer-token gate.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/weddings", resource_routes::<Wedding>())
        .nest("/guests", resource_routes::<Guest>())
        .nest("/expenses", resource_routes::<Expense>())
        .layer(middleware::from_fn_with_state(state, require_bearer))
}

/// The full application. Layers run outermost first: access log, security headers, CORS,
/// error translation, panic capture, body limit.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();
    Router::new()
        .merge(common_routes())
        .nest("/api", api_routes(state.clone()))
        .with_state(state)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(config.clone(), translate_errors))
        .layer(cors_layer(&config))
        .layer(middleware::from_fn(security_headers))
        .layer(access_log(config.mode))
}
