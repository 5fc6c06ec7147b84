//! Request body checks shared by every resource.

use crate::error::AppError;
use crate::sql::Changes;

pub struct RequestValidator;

impl RequestValidator {
    /// A required POST field must be present and non-null.
    pub fn require<T>(field: &str, value: Option<T>) -> Result<T, AppError> {
        value.ok_or_else(|| AppError::Validation(format!("Missing {} in request body.", field)))
    }

    /// A PATCH must carry at least one recognized field with a non-blank value (see
    /// `FieldValue::is_blank`). Once that holds, only absent and null fields are dropped, so a
    /// zero next to a real value is still written. `accepted` names the fields for the message.
    pub fn require_any(changes: Changes, accepted: &str) -> Result<Changes, AppError> {
        if changes.iter().all(|(_, v)| v.is_blank()) {
            return Err(AppError::Validation(format!(
                "Request body must contain either {}",
                accepted
            )));
        }
        Ok(changes.into_iter().filter(|(_, v)| !v.is_null()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::FieldValue;

    #[test]
    fn require_names_the_missing_field() {
        let err = RequestValidator::require::<i64>("eventId", None).unwrap_err();
        assert_eq!(err.to_string(), "Missing eventId in request body.");
        assert_eq!(RequestValidator::require("eventId", Some(3)).unwrap(), 3);
    }

    #[test]
    fn require_any_rejects_all_blank() {
        let changes = vec![
            ("name", FieldValue::Text(Some(String::new()))),
            ("email", FieldValue::Text(None)),
        ];
        let err = RequestValidator::require_any(changes, "name or email").unwrap_err();
        assert_eq!(err.to_string(), "Request body must contain either name or email");
    }

    #[test]
    fn require_any_treats_zero_as_blank() {
        let changes = vec![
            ("spending", FieldValue::Money(Some(rust_decimal::Decimal::ZERO))),
            ("event_id", FieldValue::Id(Some(0))),
        ];
        assert!(RequestValidator::require_any(changes, "spending or eventId").is_err());
    }

    #[test]
    fn require_any_keeps_only_supplied_fields() {
        let changes = vec![
            ("name", FieldValue::Text(Some("Prince Philip".into()))),
            ("email", FieldValue::Text(None)),
        ];
        let kept = RequestValidator::require_any(changes, "name or email").unwrap();
        assert_eq!(kept, vec![("name", FieldValue::Text(Some("Prince Philip".into())))]);
    }
}
