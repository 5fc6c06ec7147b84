//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from a table description.

use crate::model::{Table, PRIMARY_KEY};
use crate::sql::params::FieldValue;

/// Quote identifier for PostgreSQL (safe: only from static table descriptions).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<FieldValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: FieldValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

fn select_column_list(table: &Table) -> String {
    table
        .columns
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every row, ordered by primary key.
pub fn select_all(table: &Table) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(table),
        quoted(table.name),
        quoted(PRIMARY_KEY)
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(table: &Table, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(FieldValue::from(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        select_column_list(table),
        quoted(table.name),
        quoted(PRIMARY_KEY),
        n
    );
    q
}

/// INSERT one row and return it as stored.
pub fn insert(table: &Table, changes: &[(&'static str, FieldValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let returning = select_column_list(table);
    if changes.is_empty() {
        q.sql = format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", quoted(table.name), returning);
        return q;
    }
    let mut cols = Vec::with_capacity(changes.len());
    let mut placeholders = Vec::with_capacity(changes.len());
    for (col, v) in changes {
        cols.push(quoted(col));
        let n = q.push_param(v.clone());
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(table.name),
        cols.join(", "),
        placeholders.join(", "),
        returning
    );
    q
}

/// UPDATE the given columns of one row. Caller must not pass empty changes.
pub fn update(table: &Table, id: i64, changes: &[(&'static str, FieldValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(changes.len());
    for (col, v) in changes {
        let n = q.push_param(v.clone());
        sets.push(format!("{} = ${}", quoted(col), n));
    }
    let n = q.push_param(FieldValue::from(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        quoted(table.name),
        sets.join(", "),
        quoted(PRIMARY_KEY),
        n
    );
    q
}

/// DELETE by primary key.
pub fn delete(table: &Table, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(FieldValue::from(id));
    q.sql = format!("DELETE FROM {} WHERE {} = ${}", quoted(table.name), quoted(PRIMARY_KEY), n);
    q
}
