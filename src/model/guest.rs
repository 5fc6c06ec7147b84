use crate::error::AppError;
use crate::model::table::{Column, ColumnKind, Table};
use crate::model::{IntoChanges, Resource};
use crate::sanitize::escape_html;
use crate::service::RequestValidator;
use crate::sql::{Changes, FieldValue};
use serde::{Deserialize, Serialize};

pub const GUESTS: Table = Table {
    name: "unity_guests",
    columns: &[
        Column::id(),
        Column::required("name", ColumnKind::Text),
        Column::required("email", ColumnKind::Text),
        Column::required("event_id", ColumnKind::Reference { table: "unity_weddings" }),
    ],
};

#[derive(Clone, Debug, Deserialize)]
pub struct Guest {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub event_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub event_id: i64,
}

/// POST body. Older clients send the wedding id as `event`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGuest {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "event")]
    pub event_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "event")]
    pub event_id: Option<i64>,
}

impl Resource for Guest {
    const NOUN: &'static str = "Guest";
    const TABLE: &'static Table = &GUESTS;

    type View = GuestView;
    type Create = NewGuest;
    type Patch = GuestPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn view(&self) -> GuestView {
        GuestView {
            id: self.id,
            name: escape_html(&self.name),
            email: escape_html(&self.email),
            event_id: self.event_id,
        }
    }
}

impl IntoChanges for NewGuest {
    fn into_changes(self) -> Result<Changes, AppError> {
        let name = RequestValidator::require("name", self.name)?;
        let email = RequestValidator::require("email", self.email)?;
        let event_id = RequestValidator::require("eventId", self.event_id)?;
        Ok(vec![
            ("name", FieldValue::from(name)),
            ("email", FieldValue::from(email)),
            ("event_id", FieldValue::from(event_id)),
        ])
    }
}

impl IntoChanges for GuestPatch {
    fn into_changes(self) -> Result<Changes, AppError> {
        let changes = vec![
            ("name", FieldValue::Text(self.name)),
            ("email", FieldValue::Text(self.email)),
            ("event_id", FieldValue::Id(self.event_id)),
        ];
        RequestValidator::require_any(changes, "name, email, or eventId")
    }
}
