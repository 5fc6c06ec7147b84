use crate::error::AppError;
use crate::model::table::{Column, ColumnKind, Table};
use crate::model::{IntoChanges, Resource};
use crate::service::RequestValidator;
use crate::sql::{Changes, FieldValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const WEDDINGS: Table = Table {
    name: "unity_weddings",
    columns: &[
        Column::id(),
        Column::required("spending", ColumnKind::Money),
        Column::required("budget", ColumnKind::Money),
    ],
};

#[derive(Clone, Debug, Deserialize)]
pub struct Wedding {
    pub id: i64,
    pub spending: Decimal,
    pub budget: Decimal,
}

#[derive(Debug, Serialize)]
pub struct WeddingView {
    pub id: i64,
    pub spending: Decimal,
    pub budget: Decimal,
}

/// POST body. Spending starts at zero when omitted.
#[derive(Debug, Default, Deserialize)]
pub struct NewWedding {
    pub spending: Option<Decimal>,
    pub budget: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeddingPatch {
    pub spending: Option<Decimal>,
    pub budget: Option<Decimal>,
}

impl Resource for Wedding {
    const NOUN: &'static str = "Event";
    const TABLE: &'static Table = &WEDDINGS;

    type View = WeddingView;
    type Create = NewWedding;
    type Patch = WeddingPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn view(&self) -> WeddingView {
        WeddingView {
            id: self.id,
            spending: self.spending,
            budget: self.budget,
        }
    }
}

impl IntoChanges for NewWedding {
    fn into_changes(self) -> Result<Changes, AppError> {
        let budget = RequestValidator::require("budget", self.budget)?;
        Ok(vec![
            ("spending", FieldValue::from(self.spending.unwrap_or(Decimal::ZERO))),
            ("budget", FieldValue::from(budget)),
        ])
    }
}

impl IntoChanges for WeddingPatch {
    fn into_changes(self) -> Result<Changes, AppError> {
        let changes = vec![
            ("spending", FieldValue::Money(self.spending)),
            ("budget", FieldValue::Money(self.budget)),
        ];
        RequestValidator::require_any(changes, "spending or budget")
    }
}
