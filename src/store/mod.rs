//! Repository boundary: row-level CRUD primitives over the tables in `model`.

mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::{ensure_database_exists, PgRepository};

use crate::model::Table;
use crate::sql::FieldValue;
use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// One stored row keyed by column name.
pub type Record = Map<String, Value>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("decode: {0}")]
    Decode(String),
    #[error("unknown table: {0}")]
    UnknownTable(String),
}

/// Each call is one atomic statement; there are no multi-statement transactions.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn select_all(&self, table: &'static Table) -> Result<Vec<Record>, StoreError>;

    async fn select_by_id(&self, table: &'static Table, id: i64) -> Result<Option<Record>, StoreError>;

    /// Insert and return the full stored row including the assigned id.
    async fn insert(
        &self,
        table: &'static Table,
        changes: &[(&'static str, FieldValue)],
    ) -> Result<Record, StoreError>;

    /// Returns the number of rows affected (0 or 1).
    async fn update(
        &self,
        table: &'static Table,
        id: i64,
        changes: &[(&'static str, FieldValue)],
    ) -> Result<u64, StoreError>;

    /// Returns the number of rows removed from `table` (0 or 1); dependent rows go with it.
    async fn delete(&self, table: &'static Table, id: i64) -> Result<u64, StoreError>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
