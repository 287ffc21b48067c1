use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartRejection},
    response::{IntoResponse, Response},
};
use raffle_storage::{Database, dto::upload::UploadResponse};

use crate::error::{WebError, WebResult};

use super::services::{self, UploadError};

/// Multipart field carrying the CSV file
pub const FILE_FIELD: &str = "file";

#[utoipa::path(
    post,
    path = "/api/upload_csv/",
    request_body(
        content = raffle_storage::dto::upload::UploadCsvForm,
        content_type = "multipart/form-data"
    ),
    responses(
        (status = 200, description = "Participants imported", body = UploadResponse),
        (status = 400, description = "No file, file is not UTF-8, or no valid rows", body = raffle_storage::dto::common::ErrorResponse)
    ),
    tag = "participants"
)]
pub async fn upload_csv(
    State(db): State<Database>,
    multipart: Result<Multipart, MultipartRejection>,
) -> WebResult<Response> {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!(%rejection, "Upload request is not multipart");
            return Err(UploadError::MissingFile.into());
        }
    };

    let bytes = read_file_field(multipart)
        .await?
        .ok_or(UploadError::MissingFile)?;

    let summary = services::ingest_csv(&*db.participants(), &bytes).await?;

    Ok(Json(UploadResponse {
        message: "Participants uploaded successfully.".to_string(),
        accepted: summary.accepted,
        rejected: summary.rejected,
    })
    .into_response())
}

/// Returns the contents of the first `file` part sent as a file upload.
/// Parts without a filename are plain form values and are skipped.
async fn read_file_field(mut multipart: Multipart) -> WebResult<Option<Bytes>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::BadRequest(e.body_text()))?
    {
        if field.name() == Some(FILE_FIELD) && field.file_name().is_some() {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| WebError::BadRequest(e.body_text()))?;
            return Ok(Some(bytes));
        }
    }

    Ok(None)
}
