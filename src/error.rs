//! Typed errors and HTTP mapping.

use crate::store::StoreError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("Unauthorized request")]
    Unauthorized,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(rejection.body_text());
        }
        AppError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorBody {
            error: ErrorDetail { message: message.into() },
        }
    }
}

/// Attached to 500 responses so the error translator can decide how much of the failure to disclose.
#[derive(Clone, Debug)]
pub struct ServerFault {
    pub message: String,
    pub detail: String,
}

/// Message used for every 500 body that must not leak internals.
pub const GENERIC_SERVER_MESSAGE: &str = "server issue";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(message) | AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message))).into_response()
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, Json(ErrorBody::new(message))).into_response(),
            AppError::PayloadTooLarge(message) => {
                (StatusCode::PAYLOAD_TOO_LARGE, Json(ErrorBody::new(message))).into_response()
            }
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": "Unauthorized request" })),
            )
                .into_response(),
            AppError::Store(e) => {
                let fault = ServerFault {
                    message: e.to_string(),
                    detail: format!("{:?}", e),
                };
                let mut res = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new(GENERIC_SERVER_MESSAGE)),
                )
                    .into_response();
                res.extensions_mut().insert(fault);
                res
            }
        }
    }
}
