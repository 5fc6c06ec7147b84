use crate::error::AppError;
use crate::model::table::{Column, ColumnKind, Table};
use crate::model::{IntoChanges, Resource};
use crate::sanitize::escape_html;
use crate::service::RequestValidator;
use crate::sql::{Changes, FieldValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const EXPENSES: Table = Table {
    name: "unity_expenses",
    columns: &[
        Column::id(),
        Column::required("vendor", ColumnKind::Text),
        Column::optional("note", ColumnKind::Text),
        Column::required("price", ColumnKind::Money),
        Column::required("event_id", ColumnKind::Reference { table: "unity_weddings" }),
    ],
};

#[derive(Clone, Debug, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub vendor: String,
    pub note: Option<String>,
    pub price: Decimal,
    pub event_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseView {
    pub id: i64,
    pub vendor: String,
    pub note: Option<String>,
    pub price: Decimal,
    pub event_id: i64,
}

/// POST body. Older clients send the vendor as `expense`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    #[serde(alias = "expense")]
    pub vendor: Option<String>,
    pub note: Option<String>,
    pub price: Option<Decimal>,
    pub event_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePatch {
    #[serde(alias = "expense")]
    pub vendor: Option<String>,
    pub note: Option<String>,
    pub price: Option<Decimal>,
    pub event_id: Option<i64>,
}

impl Resource for Expense {
    const NOUN: &'static str = "Expense";
    const TABLE: &'static Table = &EXPENSES;

    type View = ExpenseView;
    type Create = NewExpense;
    type Patch = ExpensePatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn view(&self) -> ExpenseView {
        ExpenseView {
            id: self.id,
            vendor: escape_html(&self.vendor),
            note: self.note.as_deref().map(escape_html),
            price: self.price,
            event_id: self.event_id,
        }
    }
}

impl IntoChanges for NewExpense {
    fn into_changes(self) -> Result<Changes, AppError> {
        let vendor = RequestValidator::require("vendor", self.vendor)?;
        let price = RequestValidator::require("price", self.price)?;
        let event_id = RequestValidator::require("eventId", self.event_id)?;
        Ok(vec![
            ("vendor", FieldValue::from(vendor)),
            ("note", FieldValue::Text(self.note)),
            ("price", FieldValue::from(price)),
            ("event_id", FieldValue::from(event_id)),
        ])
    }
}

impl IntoChanges for ExpensePatch {
    fn into_changes(self) -> Result<Changes, AppError> {
        let changes = vec![
            ("vendor", FieldValue::Text(self.vendor)),
            ("note", FieldValue::Text(self.note)),
            ("price", FieldValue::Money(self.price)),
            ("event_id", FieldValue::Id(self.event_id)),
        ];
        RequestValidator::require_any(changes, "vendor, note, price, or eventId")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_expense_key_fills_vendor() {
        let body: NewExpense = serde_json::from_str(r#"{"expense":"Haku Spring","price":"4300","eventId":2}"#).unwrap();
        assert_eq!(body.vendor.as_deref(), Some("Haku Spring"));
    }

    #[test]
    fn missing_fields_are_reported_in_order() {
        let err = NewExpense::default().into_changes().unwrap_err();
        assert_eq!(err.to_string(), "Missing vendor in request body.");

        let body = NewExpense {
            vendor: Some("Emperor Palace".into()),
            ..Default::default()
        };
        assert_eq!(body.into_changes().unwrap_err().to_string(), "Missing price in request body.");
    }

    #[test]
    fn view_escapes_free_text_but_not_numbers() {
        let expense = Expense {
            id: 7,
            vendor: "<script>alert(1)</script>".into(),
            note: Some("Bad <img src=x onerror=alert(1)>".into()),
            price: Decimal::new(150000, 2),
            event_id: 1,
        };
        let view = expense.view();
        assert_eq!(view.vendor, "&lt;script&gt;alert(1)&lt;/script&gt;");
        assert_eq!(view.note.as_deref(), Some("Bad &lt;img src=x onerror=alert(1)&gt;"));
        assert_eq!(view.price.to_string(), "1500.00");
    }
}
