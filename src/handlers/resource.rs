//! Resource CRUD handlers, generic over `Resource`: list, create, read, update, delete.

use crate::error::AppError;
use crate::extractors::Member;
use crate::model::{IntoChanges, Resource};
use crate::response::{created, member_location, ok_many, ok_one};
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, OriginalUri, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list<R: Resource>(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::<R>::list_all(state.repo.as_ref()).await?;
    Ok(ok_many(rows.iter().map(R::view).collect()))
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<R::Create>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let changes = body.into_changes()?;
    let row = CrudService::<R>::insert(state.repo.as_ref(), changes).await?;
    let location = member_location(uri.path(), row.id());
    tracing::info!(table = R::TABLE.name, id = row.id(), "created");
    created(&location, row.view())
}

pub async fn read<R: Resource>(Member(row): Member<R>) -> impl IntoResponse {
    ok_one(row.view())
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Member(row): Member<R>,
    body: Result<Json<R::Patch>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(body) = body?;
    let changes = body.into_changes()?;
    CrudService::<R>::update(state.repo.as_ref(), row.id(), changes).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Member(row): Member<R>,
) -> Result<StatusCode, AppError> {
    CrudService::<R>::remove(state.repo.as_ref(), row.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}
