//! CORS restricted to the configured client origin.

use crate::config::Config;
use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE, LOCATION},
    Method,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Only a matching `Origin` is echoed back; other origins get no allow header.
pub fn cors_layer(config: &Config) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([config.client_origin.clone()]))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .expose_headers([LOCATION])
}
