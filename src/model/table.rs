//! Static descriptions of the persisted tables. The SQL builder, the migrations and the
//! in-memory repository all work from these.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Auto-assigned primary key.
    Id,
    Text,
    Money,
    /// Foreign key to `table.id`; rows are removed together with their parent.
    Reference { table: &'static str },
}

#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
}

impl Column {
    pub const fn id() -> Column {
        Column { name: PRIMARY_KEY, kind: ColumnKind::Id, nullable: false }
    }

    pub const fn required(name: &'static str, kind: ColumnKind) -> Column {
        Column { name, kind, nullable: false }
    }

    pub const fn optional(name: &'static str, kind: ColumnKind) -> Column {
        Column { name, kind, nullable: true }
    }
}

pub const PRIMARY_KEY: &str = "id";

/// `Money` columns are `NUMERIC(MONEY_PRECISION, MONEY_SCALE)`.
pub const MONEY_PRECISION: u32 = 12;
pub const MONEY_SCALE: u32 = 2;

#[derive(Debug)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns of this table that reference `parent`.
    pub fn references_to<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a Column> + 'a {
        self.columns
            .iter()
            .filter(move |c| matches!(c.kind, ColumnKind::Reference { table } if table == parent))
    }
}
