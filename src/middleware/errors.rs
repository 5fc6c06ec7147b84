//! Terminal error translation: every 500 leaves through here, shaped by the run mode.

use crate::config::Config;
use crate::error::{ErrorBody, ServerFault, GENERIC_SERVER_MESSAGE};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;
use std::sync::Arc;

pub async fn translate_errors(State(config): State<Arc<Config>>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let Some(fault) = response.extensions_mut().remove::<ServerFault>() else {
        return response;
    };
    tracing::error!(error = %fault.message, detail = %fault.detail, "request failed");
    if config.mode.is_production() {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(GENERIC_SERVER_MESSAGE))).into_response();
    }
    let body = serde_json::json!({
        "message": fault.message,
        "error": {
            "message": fault.message,
            "detail": fault.detail,
        },
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Handler for `CatchPanicLayer`. Emits a 500 carrying a fault so `translate_errors` applies the mode policy.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    let mut response = (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(GENERIC_SERVER_MESSAGE))).into_response();
    response.extensions_mut().insert(ServerFault {
        detail: format!("panic: {}", message),
        message,
    });
    response
}
