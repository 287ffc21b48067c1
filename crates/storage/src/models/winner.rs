use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A drawing outcome. Copies the winner's name and designation at the time of
/// the draw rather than referencing a participant row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Winner {
    pub id: i64,
    pub name: String,
    pub designation: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}
