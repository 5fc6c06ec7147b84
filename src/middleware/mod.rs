//! Request pipeline: access log, security headers, CORS, bearer authentication, error translation.

mod access_log;
mod auth;
mod cors;
mod errors;
mod security;

pub use access_log::access_log;
pub use auth::require_bearer;
pub use cors::cors_layer;
pub use errors::{panic_response, translate_errors};
pub use security::{security_headers, SECURITY_HEADERS};
