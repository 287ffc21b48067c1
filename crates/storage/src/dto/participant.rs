use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::common::{FieldErrors, expect_object, required_char_field, text_field, validated};

pub const PARTICIPANT_NAME_MAX: usize = 255;

/// Response containing a stored participant
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantResponse {
    pub id: i64,
    pub name: String,
    pub designation: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Request payload for creating a participant, also produced for each
/// accepted CSV row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateParticipantRequest {
    #[validate(custom(function = "validate_participant_name"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(
        max = 255,
        message = "Ensure this field has no more than 255 characters."
    ))]
    pub designation: Option<String>,
}

fn validate_participant_name(name: &str) -> Result<(), validator::ValidationError> {
    required_char_field(name, PARTICIPANT_NAME_MAX)
}

impl CreateParticipantRequest {
    pub fn new(name: impl Into<String>, designation: Option<String>) -> Self {
        Self {
            name: name.into(),
            designation,
        }
    }

    /// Parses a JSON request body, reporting missing, null or mistyped
    /// fields the same way as failed validation rules
    pub fn from_value(value: &Value) -> Result<Self, FieldErrors> {
        let object = expect_object(value)?;
        let mut errors = FieldErrors::default();

        let name = text_field(object, "name", true, &mut errors).unwrap_or_default();
        let designation = text_field(object, "designation", false, &mut errors);

        validated(Self { name, designation }, errors)
    }
}

impl From<crate::models::Participant> for ParticipantResponse {
    fn from(participant: crate::models::Participant) -> Self {
        Self {
            id: participant.id,
            name: participant.name,
            designation: participant.designation,
            created_at: participant.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_participant() {
        let req = CreateParticipantRequest::new("Alice", Some("HR".to_string()));
        assert!(req.validate().is_ok());

        let req = CreateParticipantRequest::new("Alice", None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let errors = CreateParticipantRequest::new("", None)
            .validate()
            .unwrap_err();
        let fields = FieldErrors::from(&errors);
        assert_eq!(
            fields.get("name"),
            Some(&["This field may not be blank.".to_string()][..])
        );
    }

    #[test]
    fn test_length_limits() {
        assert!(
            CreateParticipantRequest::new("a".repeat(255), Some("b".repeat(255)))
                .validate()
                .is_ok()
        );

        let errors = CreateParticipantRequest::new("a".repeat(256), Some("b".repeat(256)))
            .validate()
            .unwrap_err();
        let fields = FieldErrors::from(&errors);
        assert!(fields.contains("name"));
        assert!(fields.contains("designation"));
    }

    #[test]
    fn test_designation_defaults_to_none() {
        let req: CreateParticipantRequest =
            serde_json::from_value(json!({"name": "Alice"})).unwrap();
        assert_eq!(req.designation, None);

        let req = CreateParticipantRequest::from_value(&json!({"name": "Alice"})).unwrap();
        assert_eq!(req.designation, None);
    }

    #[test]
    fn test_from_value_reports_missing_and_mistyped_fields() {
        let errors =
            CreateParticipantRequest::from_value(&json!({"designation": "HR"})).unwrap_err();
        assert_eq!(
            errors.get("name"),
            Some(&["This field is required.".to_string()][..])
        );

        let errors =
            CreateParticipantRequest::from_value(&json!({"name": null, "designation": []}))
                .unwrap_err();
        assert_eq!(
            errors.get("name"),
            Some(&["This field may not be null.".to_string()][..])
        );
        assert_eq!(
            errors.get("designation"),
            Some(&["Not a valid string.".to_string()][..])
        );
    }

    #[test]
    fn test_from_value_trims_name() {
        let req = CreateParticipantRequest::from_value(&json!({"name": "  Alice "})).unwrap();
        assert_eq!(req, CreateParticipantRequest::new("Alice", None));

        let errors = CreateParticipantRequest::from_value(&json!({"name": "  "})).unwrap_err();
        assert_eq!(
            errors.get("name"),
            Some(&["This field may not be blank.".to_string()][..])
        );
    }
}
