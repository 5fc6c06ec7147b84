//! Apply the table descriptions to the database: CREATE TABLE with foreign keys, then indexes on
//! the reference columns. Tables are created parents first; every statement is idempotent.

use crate::model::{ColumnKind, Table, MONEY_PRECISION, MONEY_SCALE, PRIMARY_KEY, TABLES};
use crate::sql::quoted;
use crate::store::StoreError;
use sqlx::PgPool;

pub async fn apply_migrations(pool: &PgPool) -> Result<(), StoreError> {
    for table in TABLES {
        let ddl = create_table_sql(table);
        tracing::debug!(sql = %ddl, "migration");
        sqlx::query(&ddl).execute(pool).await?;
        for sql in reference_index_sql(table) {
            tracing::debug!(sql = %sql, "migration");
            sqlx::query(&sql).execute(pool).await?;
        }
    }
    tracing::info!(tables = TABLES.len(), "schema ready");
    Ok(())
}

fn column_type(kind: ColumnKind) -> String {
    match kind {
        ColumnKind::Id => "BIGSERIAL".into(),
        ColumnKind::Text => "TEXT".into(),
        ColumnKind::Money => format!("NUMERIC({}, {})", MONEY_PRECISION, MONEY_SCALE),
        ColumnKind::Reference { table } => format!(
            "BIGINT REFERENCES {} ({}) ON DELETE CASCADE",
            quoted(table),
            quoted(PRIMARY_KEY)
        ),
    }
}

pub fn create_table_sql(table: &Table) -> String {
    let mut col_defs: Vec<String> = Vec::with_capacity(table.columns.len() + 1);
    for c in table.columns {
        let mut def = format!("{} {}", quoted(c.name), column_type(c.kind));
        if !c.nullable {
            def.push_str(" NOT NULL");
        }
        col_defs.push(def);
    }
    col_defs.push(format!("PRIMARY KEY ({})", quoted(PRIMARY_KEY)));
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quoted(table.name),
        col_defs.join(",\n  ")
    )
}

pub fn reference_index_sql(table: &Table) -> Vec<String> {
    table
        .columns
        .iter()
        .filter(|c| matches!(c.kind, ColumnKind::Reference { .. }))
        .map(|c| {
            format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                quoted(&format!("{}_{}_idx", table.name, c.name)),
                quoted(table.name),
                quoted(c.name)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EXPENSES, WEDDINGS};

    #[test]
    fn wedding_table_ddl() {
        assert_eq!(
            create_table_sql(&WEDDINGS),
            "CREATE TABLE IF NOT EXISTS \"unity_weddings\" (\n  \"id\" BIGSERIAL NOT NULL,\n  \"spending\" NUMERIC(12, 2) NOT NULL,\n  \"budget\" NUMERIC(12, 2) NOT NULL,\n  PRIMARY KEY (\"id\")\n)"
        );
    }

    #[test]
    fn expense_references_cascade_and_note_is_nullable() {
        let ddl = create_table_sql(&EXPENSES);
        assert!(ddl.contains("\"note\" TEXT,"));
        assert!(ddl.contains(
            "\"event_id\" BIGINT REFERENCES \"unity_weddings\" (\"id\") ON DELETE CASCADE NOT NULL"
        ));
    }

    #[test]
    fn only_reference_columns_get_indexes() {
        assert!(reference_index_sql(&WEDDINGS).is_empty());
        assert_eq!(
            reference_index_sql(&EXPENSES),
            vec!["CREATE INDEX IF NOT EXISTS \"unity_expenses_event_id_idx\" ON \"unity_expenses\" (\"event_id\")"]
        );
    }
}
