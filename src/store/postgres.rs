//! PostgreSQL repository over a sqlx pool, and database bootstrap.

use crate::model::{ColumnKind, Table};
use crate::sql::{self, FieldValue, QueryBuf};
use crate::store::{Record, Repository, StoreError};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{ConnectOptions, PgPool, Postgres, Row};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        PgRepository { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<PgRow>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        bind_params(sqlx::query(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<PgRow>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        bind_params(sqlx::query(&q.sql), &q.params)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let done = bind_params(sqlx::query(&q.sql), &q.params)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(done.rows_affected())
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn select_all(&self, table: &'static Table) -> Result<Vec<Record>, StoreError> {
        let rows = self.fetch_all(&sql::select_all(table)).await?;
        rows.iter().map(|r| row_to_record(table, r)).collect()
    }

    async fn select_by_id(&self, table: &'static Table, id: i64) -> Result<Option<Record>, StoreError> {
        let row = self.fetch_optional(&sql::select_by_id(table, id)).await?;
        row.map(|r| row_to_record(table, &r)).transpose()
    }

    async fn insert(
        &self,
        table: &'static Table,
        changes: &[(&'static str, FieldValue)],
    ) -> Result<Record, StoreError> {
        let row = self
            .fetch_optional(&sql::insert(table, changes))
            .await?
            .ok_or(StoreError::Db(sqlx::Error::RowNotFound))?;
        row_to_record(table, &row)
    }

    async fn update(
        &self,
        table: &'static Table,
        id: i64,
        changes: &[(&'static str, FieldValue)],
    ) -> Result<u64, StoreError> {
        if changes.is_empty() {
            return Ok(0);
        }
        self.execute(&sql::update(table, id, changes)).await
    }

    async fn delete(&self, table: &'static Table, id: i64) -> Result<u64, StoreError> {
        // Children go through ON DELETE CASCADE.
        self.execute(&sql::delete(table, id)).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [FieldValue],
) -> Query<'q, Postgres, PgArguments> {
    for p in params {
        query = match p {
            FieldValue::Id(v) => query.bind(*v),
            FieldValue::Text(v) => query.bind(v.as_deref()),
            FieldValue::Money(v) => query.bind(*v),
        };
    }
    query
}

/// Decode by the column kinds of the table so every record has the same shape as the in-memory store's.
fn row_to_record(table: &Table, row: &PgRow) -> Result<Record, StoreError> {
    let mut map = Record::new();
    for col in table.columns {
        let value = match col.kind {
            ColumnKind::Id | ColumnKind::Reference { .. } => FieldValue::Id(row.try_get(col.name)?),
            ColumnKind::Text => FieldValue::Text(row.try_get(col.name)?),
            ColumnKind::Money => FieldValue::Money(row.try_get(col.name)?),
        };
        map.insert(col.name.to_string(), value.to_json());
    }
    Ok(map)
}

/// Constraint failures (not-null, foreign key, unique, check) keep the server's message; everything else stays a db error.
fn map_db_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        let is_constraint = db.code().map(|c| c.starts_with("23")).unwrap_or(false);
        if is_constraint {
            return StoreError::Constraint(db.message().to_string());
        }
    }
    StoreError::Db(e)
}

/// Create the database named in `database_url` if it does not exist (connects to the `postgres` maintenance db).
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), StoreError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| StoreError::Db(sqlx::Error::Configuration("DATABASE_URL: no path".into())))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}
