use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Successful CSV upload summary. Created participants are not echoed back.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    /// Rows stored as participants
    pub accepted: usize,
    /// Rows dropped for having fewer than two fields or failing validation
    pub rejected: usize,
}

/// Multipart form accepted by `POST /api/upload_csv/`
#[derive(Debug, ToSchema)]
pub struct UploadCsvForm {
    /// Comma-separated `name,designation` rows, no header
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
