//! Response helpers shared by the resource handlers.

use crate::error::AppError;
use axum::{
    http::{header::LOCATION, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// `<collection>/<id>`, tolerant of a trailing slash on the collection path.
pub fn member_location(collection_path: &str, id: i64) -> String {
    format!("{}/{}", collection_path.trim_end_matches('/'), id)
}

/// 201 with a `Location` header pointing at the new member.
pub fn created<T: Serialize>(location: &str, body: T) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(location)
        .map_err(|_| AppError::BadRequest(format!("invalid location: {}", location)))?;
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(body)).into_response())
}

pub fn ok_one<T: Serialize>(body: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(body))
}

pub fn ok_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<Vec<T>>) {
    (StatusCode::OK, Json(data))
}
