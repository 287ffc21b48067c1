use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::common::{FieldErrors, expect_object, required_char_field, text_field, validated};

pub const WINNER_NAME_MAX: usize = 100;

/// Response containing a stored winner
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WinnerResponse {
    pub id: i64,
    pub name: String,
    pub designation: Option<String>,
}

/// A single winner that passed parsing and validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateWinnerRequest {
    #[validate(custom(function = "validate_winner_name"))]
    pub name: String,

    #[validate(length(
        max = 255,
        message = "Ensure this field has no more than 255 characters."
    ))]
    pub designation: Option<String>,
}

/// Body of `POST /api/winners/`. Items are kept as raw JSON so each one can be
/// checked on its own and reported with field-level errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SaveWinnersRequest {
    #[serde(default)]
    #[schema(value_type = Vec<CreateWinnerRequest>)]
    pub winners: Vec<Value>,
}

fn validate_winner_name(name: &str) -> Result<(), validator::ValidationError> {
    required_char_field(name, WINNER_NAME_MAX)
}

impl CreateWinnerRequest {
    pub fn new(name: impl Into<String>, designation: Option<String>) -> Self {
        Self {
            name: name.into(),
            designation,
        }
    }

    /// Parses an arbitrary JSON value into a winner, collecting every field
    /// problem instead of stopping at the first one. Unknown keys are ignored.
    pub fn from_value(value: &Value) -> Result<Self, FieldErrors> {
        let object = expect_object(value)?;
        let mut errors = FieldErrors::default();

        let name = text_field(object, "name", true, &mut errors).unwrap_or_default();
        let designation = text_field(object, "designation", false, &mut errors);

        validated(Self { name, designation }, errors)
    }
}

impl From<crate::models::Winner> for WinnerResponse {
    fn from(winner: crate::models::Winner) -> Self {
        Self {
            id: winner.id,
            name: winner.name,
            designation: winner.designation,
        }
    }
}

/// Successful `POST /api/winners/` body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveWinnersResponse {
    pub message: String,
    pub saved: usize,
}

/// `DELETE /api/winners/delete-all/` body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteWinnersResponse {
    pub message: String,
    pub deleted: u64,
}

/// Failed `POST /api/winners/` body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvalidWinnerResponse {
    pub error: String,
    pub details: FieldErrors,
    /// Position of the rejected item in the submitted list
    pub index: usize,
    /// Items stored before the rejected one
    pub saved: usize,
}
