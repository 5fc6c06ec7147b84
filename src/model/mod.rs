//! Typed resources: stored row, public view, and request bodies per table.

mod expense;
mod guest;
mod table;
mod wedding;

pub use expense::{Expense, ExpensePatch, ExpenseView, NewExpense, EXPENSES};
pub use guest::{Guest, GuestPatch, GuestView, NewGuest, GUESTS};
pub use table::{Column, ColumnKind, Table, MONEY_PRECISION, MONEY_SCALE, PRIMARY_KEY};
pub use wedding::{NewWedding, Wedding, WeddingPatch, WeddingView, WEDDINGS};

use crate::error::AppError;
use crate::sql::Changes;
use serde::{de::DeserializeOwned, Serialize};

/// Every table the service owns, parents before children.
pub const TABLES: [&Table; 3] = [&WEDDINGS, &GUESTS, &EXPENSES];

/// A request body that turns into column changes, or explains why it can't.
pub trait IntoChanges {
    fn into_changes(self) -> Result<Changes, AppError>;
}

/// Ties a stored row type to its table, its public view and its request bodies.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Used in "<noun> not found".
    const NOUN: &'static str;
    const TABLE: &'static Table;

    type View: Serialize + Send;
    type Create: IntoChanges + DeserializeOwned + Send + 'static;
    type Patch: IntoChanges + DeserializeOwned + Send + 'static;

    fn id(&self) -> i64;

    /// Whitelisted, sanitized output form.
    fn view(&self) -> Self::View;
}
