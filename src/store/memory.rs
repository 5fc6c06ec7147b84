//! In-memory repository with the same constraints as the PostgreSQL schema: not-null columns,
//! foreign keys to existing parents, and cascading deletes. Used by tests and local demos.

use crate::model::{ColumnKind, Table, MONEY_PRECISION, MONEY_SCALE, PRIMARY_KEY, TABLES};
use crate::sql::FieldValue;
use crate::store::{Record, Repository, StoreError};
use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockWriteGuard};

#[derive(Default)]
struct MemTable {
    last_id: i64,
    rows: BTreeMap<i64, Record>,
}

pub struct MemoryRepository {
    tables: &'static [&'static Table],
    data: RwLock<HashMap<&'static str, MemTable>>,
}

impl Default for MemoryRepository {
    fn default() -> Self {
        MemoryRepository::new(&TABLES)
    }
}

impl MemoryRepository {
    pub fn new(tables: &'static [&'static Table]) -> Self {
        let data = tables.iter().map(|t| (t.name, MemTable::default())).collect();
        MemoryRepository {
            tables,
            data: RwLock::new(data),
        }
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<&'static str, MemTable>>, StoreError> {
        self.data
            .write()
            .map_err(|_| StoreError::Decode("memory store lock poisoned".into()))
    }

    /// Check one value against its column: known column, not-null, and parent row present.
    fn check_value(
        &self,
        data: &HashMap<&'static str, MemTable>,
        table: &Table,
        column: &str,
        value: &FieldValue,
    ) -> Result<(), StoreError> {
        let col = table.column(column).ok_or_else(|| {
            StoreError::Constraint(format!("column \"{}\" of relation \"{}\" does not exist", column, table.name))
        })?;
        if value.is_null() {
            if col.nullable {
                return Ok(());
            }
            return Err(StoreError::Constraint(format!(
                "null value in column \"{}\" of relation \"{}\" violates not-null constraint",
                column, table.name
            )));
        }
        if let (ColumnKind::Reference { table: parent }, FieldValue::Id(Some(parent_id))) = (col.kind, value) {
            let exists = data.get(parent).map(|t| t.rows.contains_key(parent_id)).unwrap_or(false);
            if !exists {
                return Err(StoreError::Constraint(format!(
                    "insert or update on table \"{}\" violates foreign key constraint: key ({})=({}) is not present in table \"{}\"",
                    table.name, column, parent_id, parent
                )));
            }
        }
        Ok(())
    }

    /// Remove the row and, recursively, every row that references it.
    fn delete_cascade(&self, data: &mut HashMap<&'static str, MemTable>, table: &str, id: i64) -> u64 {
        let removed = data.get_mut(table).and_then(|t| t.rows.remove(&id)).is_some();
        if !removed {
            return 0;
        }
        for child in self.tables {
            for col in child.references_to(table) {
                let orphans: Vec<i64> = data
                    .get(child.name)
                    .map(|t| {
                        t.rows
                            .iter()
                            .filter(|(_, row)| row.get(col.name).and_then(Value::as_i64) == Some(id))
                            .map(|(child_id, _)| *child_id)
                            .collect()
                    })
                    .unwrap_or_default();
                for child_id in orphans {
                    self.delete_cascade(data, child.name, child_id);
                }
            }
        }
        1
    }
}

/// Stored JSON form of a value. Money is rounded and padded to the column scale and must fit
/// the column precision, matching what PostgreSQL does for `NUMERIC(p, s)`.
fn stored(value: &FieldValue) -> Result<Value, StoreError> {
    let FieldValue::Money(Some(d)) = value else {
        return Ok(value.to_json());
    };
    let mut d = d.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    d.rescale(MONEY_SCALE);
    let limit = Decimal::from(10_i64.pow(MONEY_PRECISION - MONEY_SCALE));
    if d.abs() >= limit {
        return Err(StoreError::Constraint(format!(
            "numeric field overflow: {} does not fit NUMERIC({}, {})",
            d, MONEY_PRECISION, MONEY_SCALE
        )));
    }
    Ok(Value::String(d.to_string()))
}

fn unknown(table: &Table) -> StoreError {
    StoreError::UnknownTable(table.name.to_string())
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn select_all(&self, table: &'static Table) -> Result<Vec<Record>, StoreError> {
        let data = self
            .data
            .read()
            .map_err(|_| StoreError::Decode("memory store lock poisoned".into()))?;
        let t = data.get(table.name).ok_or_else(|| unknown(table))?;
        Ok(t.rows.values().cloned().collect())
    }

    async fn select_by_id(&self, table: &'static Table, id: i64) -> Result<Option<Record>, StoreError> {
        let data = self
            .data
            .read()
            .map_err(|_| StoreError::Decode("memory store lock poisoned".into()))?;
        let t = data.get(table.name).ok_or_else(|| unknown(table))?;
        Ok(t.rows.get(&id).cloned())
    }

    async fn insert(
        &self,
        table: &'static Table,
        changes: &[(&'static str, FieldValue)],
    ) -> Result<Record, StoreError> {
        let mut data = self.write()?;
        if !data.contains_key(table.name) {
            return Err(unknown(table));
        }
        for (col, v) in changes {
            self.check_value(&data, table, col, v)?;
        }
        let mut row = Record::new();
        for col in table.columns.iter().filter(|c| c.kind != ColumnKind::Id) {
            let value = match changes.iter().find(|(name, _)| *name == col.name) {
                Some((_, v)) => stored(v)?,
                None => Value::Null,
            };
            if value.is_null() && !col.nullable {
                return Err(StoreError::Constraint(format!(
                    "null value in column \"{}\" of relation \"{}\" violates not-null constraint",
                    col.name, table.name
                )));
            }
            row.insert(col.name.to_string(), value);
        }
        let t = data.get_mut(table.name).ok_or_else(|| unknown(table))?;
        t.last_id += 1;
        let id = t.last_id;
        row.insert(PRIMARY_KEY.to_string(), Value::Number(id.into()));
        t.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        table: &'static Table,
        id: i64,
        changes: &[(&'static str, FieldValue)],
    ) -> Result<u64, StoreError> {
        let mut data = self.write()?;
        let exists = data.get(table.name).ok_or_else(|| unknown(table))?.rows.contains_key(&id);
        if !exists || changes.is_empty() {
            return Ok(0);
        }
        let mut values = Vec::with_capacity(changes.len());
        for (col, v) in changes {
            self.check_value(&data, table, col, v)?;
            values.push((*col, stored(v)?));
        }
        let row = data
            .get_mut(table.name)
            .and_then(|t| t.rows.get_mut(&id))
            .ok_or_else(|| unknown(table))?;
        for (col, v) in values {
            row.insert(col.to_string(), v);
        }
        Ok(1)
    }

    async fn delete(&self, table: &'static Table, id: i64) -> Result<u64, StoreError> {
        let mut data = self.write()?;
        if !data.contains_key(table.name) {
            return Err(unknown(table));
        }
        Ok(self.delete_cascade(&mut data, table.name, id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
