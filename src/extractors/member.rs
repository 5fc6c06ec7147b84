//! Resolve the `/:id` path segment to a stored entity before any member handler runs.

use crate::error::AppError;
use crate::model::Resource;
use crate::service::CrudService;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// The entity addressed by the member route. Extraction fails with 404 "<Noun> not found"
/// when the id is not an integer or has no row.
#[derive(Clone, Debug)]
pub struct Member<R>(pub R);

#[async_trait]
impl<R: Resource> FromRequestParts<AppState> for Member<R> {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let not_found = || AppError::NotFound(format!("{} not found", R::NOUN));
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| not_found())?;
        let id: i64 = raw.trim().parse().map_err(|_| not_found())?;
        CrudService::<R>::get_by_id(state.repo.as_ref(), id)
            .await?
            .map(Member)
            .ok_or_else(not_found)
    }
}
