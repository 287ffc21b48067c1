use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// Key used for errors that belong to the item as a whole rather than a field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Field name to list of human readable messages, e.g.
/// `{"name": ["This field is required."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Appends every message from `other`, skipping fields already reported.
    pub fn merge_missing(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_insert(messages);
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut fields = Self::default();
        for (field, errors) in errors.field_errors() {
            for error in errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                fields.add(field.to_string(), message);
            }
        }
        fields
    }
}

/// Rules for a required text column: non-empty and at most `max` characters.
pub(crate) fn required_char_field(value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::from("This field may not be blank."));
        return Err(error);
    }

    if value.chars().count() > max {
        let mut error = ValidationError::new("max_length");
        error.message = Some(Cow::from(format!(
            "Ensure this field has no more than {max} characters."
        )));
        return Err(error);
    }

    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// The request body must be a JSON object; anything else is a non-field error.
pub(crate) fn expect_object(value: &Value) -> Result<&Map<String, Value>, FieldErrors> {
    value.as_object().ok_or_else(|| {
        FieldErrors::single(
            NON_FIELD_ERRORS,
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(value)
            ),
        )
    })
}

/// Reads a text field from a JSON object. Strings are trimmed, numbers are
/// taken as their decimal text, other types are rejected. An absent or null
/// value is only an error when `required` is set.
pub(crate) fn text_field(
    object: &Map<String, Value>,
    field: &str,
    required: bool,
    errors: &mut FieldErrors,
) -> Option<String> {
    match object.get(field) {
        None if required => {
            errors.add(field, "This field is required.");
            None
        }
        Some(Value::Null) if required => {
            errors.add(field, "This field may not be null.");
            None
        }
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.trim().to_string()),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(_) => {
            errors.add(field, "Not a valid string.");
            None
        }
    }
}

/// Runs the derived validation rules on a parsed candidate. Fields that
/// already failed to parse keep their parse error only.
pub(crate) fn validated<T: Validate>(
    candidate: T,
    mut errors: FieldErrors,
) -> Result<T, FieldErrors> {
    if let Err(validation) = candidate.validate() {
        errors.merge_missing(FieldErrors::from(&validation));
    }

    if errors.is_empty() {
        Ok(candidate)
    } else {
        Err(errors)
    }
}

/// Body returned with every 4xx/5xx that carries no field details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body returned when a request payload fails validation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub details: FieldErrors,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_groups_messages_by_field() {
        let mut errors = FieldErrors::default();
        errors.add("name", "first");
        errors.add("name", "second");
        errors.add("designation", "third");

        assert_eq!(
            errors.get("name"),
            Some(&["first".to_string(), "second".to_string()][..])
        );
        assert_eq!(errors.get("designation").map(<[String]>::len), Some(1));
    }

    #[test]
    fn test_merge_missing_keeps_existing_field() {
        let mut errors = FieldErrors::single("name", "This field is required.");
        let mut other = FieldErrors::single("name", "This field may not be blank.");
        other.add("designation", "Not a valid string.");

        errors.merge_missing(other);

        assert_eq!(
            errors.get("name"),
            Some(&["This field is required.".to_string()][..])
        );
        assert!(errors.contains("designation"));
    }

    #[test]
    fn test_required_char_field() {
        assert!(required_char_field("Alice", 5).is_ok());
        assert!(required_char_field("Élise", 5).is_ok());

        let blank = required_char_field("", 5).unwrap_err();
        assert_eq!(blank.code, "blank");

        let long = required_char_field("Alice!", 5).unwrap_err();
        assert_eq!(long.code, "max_length");
        assert_eq!(
            long.message.as_deref(),
            Some("Ensure this field has no more than 5 characters.")
        );
    }

    #[test]
    fn test_text_field_trims_and_accepts_numbers() {
        let object = serde_json::json!({"a": "  Alice  ", "b": 42, "c": 1.5, "d": true});
        let object = object.as_object().unwrap();
        let mut errors = FieldErrors::default();

        assert_eq!(
            text_field(object, "a", true, &mut errors).as_deref(),
            Some("Alice")
        );
        assert_eq!(
            text_field(object, "b", true, &mut errors).as_deref(),
            Some("42")
        );
        assert_eq!(
            text_field(object, "c", true, &mut errors).as_deref(),
            Some("1.5")
        );
        assert_eq!(text_field(object, "d", true, &mut errors), None);
        assert_eq!(text_field(object, "missing", false, &mut errors), None);
        assert_eq!(text_field(object, "absent", true, &mut errors), None);

        assert_eq!(
            errors.get("d"),
            Some(&["Not a valid string.".to_string()][..])
        );
        assert_eq!(
            errors.get("absent"),
            Some(&["This field is required.".to_string()][..])
        );
        assert!(!errors.contains("missing"));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let errors = FieldErrors::single("name", "This field is required.");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"name": ["This field is required."]}));
    }
}
