//! Generic CRUD execution through a `Repository`, typed by `Resource`.

use crate::error::AppError;
use crate::model::{Expense, Guest, Resource, Wedding};
use crate::sql::Changes;
use crate::store::{Record, Repository, StoreError};
use serde_json::Value;
use std::marker::PhantomData;

pub struct CrudService<R>(PhantomData<R>);

pub type WeddingsService = CrudService<Wedding>;
pub type GuestsService = CrudService<Guest>;
pub type ExpensesService = CrudService<Expense>;

impl<R: Resource> CrudService<R> {
    /// Every row in storage order. An empty table is an empty vec.
    pub async fn list_all(repo: &dyn Repository) -> Result<Vec<R>, AppError> {
        let rows = repo.select_all(R::TABLE).await?;
        rows.into_iter().map(decode::<R>).collect()
    }

    /// Fetch one row by primary key. Absent is not an error.
    pub async fn get_by_id(repo: &dyn Repository, id: i64) -> Result<Option<R>, AppError> {
        let row = repo.select_by_id(R::TABLE, id).await?;
        row.map(decode::<R>).transpose()
    }

    /// Insert one row. Returns the row as stored, with its assigned id.
    pub async fn insert(repo: &dyn Repository, changes: Changes) -> Result<R, AppError> {
        let row = repo.insert(R::TABLE, &changes).await?;
        decode(row)
    }

    /// Apply only the supplied columns. Returns affected row count.
    pub async fn update(repo: &dyn Repository, id: i64, changes: Changes) -> Result<u64, AppError> {
        let n = repo.update(R::TABLE, id, &changes).await?;
        tracing::debug!(table = R::TABLE.name, id, affected = n, "update");
        Ok(n)
    }

    /// Delete one row by id. Returns affected row count.
    pub async fn remove(repo: &dyn Repository, id: i64) -> Result<u64, AppError> {
        let n = repo.delete(R::TABLE, id).await?;
        tracing::debug!(table = R::TABLE.name, id, affected = n, "delete");
        Ok(n)
    }
}

fn decode<R: Resource>(row: Record) -> Result<R, AppError> {
    serde_json::from_value(Value::Object(row))
        .map_err(|e| AppError::Store(StoreError::Decode(format!("{} row: {}", R::TABLE.name, e))))
}
