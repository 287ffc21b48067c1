use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use raffle_storage::{
    Database,
    dto::winner::{
        DeleteWinnersResponse, InvalidWinnerResponse, SaveWinnersRequest, SaveWinnersResponse,
        WinnerResponse,
    },
};

use crate::error::WebResult;

use super::services::{self, WinnerImportMode};

#[utoipa::path(
    get,
    path = "/api/winners/",
    responses(
        (status = 200, description = "List all winners in the order they were saved", body = Vec<WinnerResponse>)
    ),
    tag = "winners"
)]
pub async fn list_winners(State(db): State<Database>) -> WebResult<Response> {
    let winners = services::list_winners(&*db.winners()).await?;

    let response: Vec<WinnerResponse> = winners.into_iter().map(WinnerResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/winners/",
    request_body = SaveWinnersRequest,
    responses(
        (status = 201, description = "Every winner saved", body = SaveWinnersResponse),
        (status = 400, description = "An item failed validation", body = InvalidWinnerResponse)
    ),
    tag = "winners"
)]
pub async fn save_winners(
    State(db): State<Database>,
    State(mode): State<WinnerImportMode>,
    Json(req): Json<SaveWinnersRequest>,
) -> WebResult<Response> {
    let saved = services::import_winners(&*db.winners(), &req.winners, mode).await?;

    Ok((
        StatusCode::CREATED,
        Json(SaveWinnersResponse {
            message: "Winners saved successfully".to_string(),
            saved,
        }),
    )
        .into_response())
}

#[utoipa::path(
    delete,
    path = "/api/winners/delete-all/",
    responses(
        (status = 200, description = "All winners deleted", body = DeleteWinnersResponse)
    ),
    tag = "winners"
)]
pub async fn delete_all_winners(State(db): State<Database>) -> WebResult<Response> {
    let deleted = services::delete_all_winners(&*db.winners()).await?;

    Ok(Json(DeleteWinnersResponse {
        message: format!("{} winners deleted successfully.", deleted),
        deleted,
    })
    .into_response())
}
