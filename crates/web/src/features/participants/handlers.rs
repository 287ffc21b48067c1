use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use raffle_storage::{
    Database,
    dto::participant::{CreateParticipantRequest, ParticipantResponse},
};
use serde_json::Value;

use crate::error::{WebError, WebResult};

use super::services;

#[utoipa::path(
    get,
    path = "/api/participants/",
    responses(
        (status = 200, description = "List all participants successfully", body = Vec<ParticipantResponse>)
    ),
    tag = "participants"
)]
pub async fn list_participants(State(db): State<Database>) -> WebResult<Response> {
    let participants = services::list_participants(&*db.participants()).await?;

    let response: Vec<ParticipantResponse> = participants
        .into_iter()
        .map(ParticipantResponse::from)
        .collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/participants/{id}/",
    params(
        ("id" = i64, Path, description = "Participant id")
    ),
    responses(
        (status = 200, description = "Participant found", body = ParticipantResponse),
        (status = 404, description = "Participant not found", body = raffle_storage::dto::common::ErrorResponse)
    ),
    tag = "participants"
)]
pub async fn get_participant(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> WebResult<Response> {
    let participant = services::get_participant(&*db.participants(), id).await?;

    Ok(Json(ParticipantResponse::from(participant)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/participants/",
    request_body = CreateParticipantRequest,
    responses(
        (status = 201, description = "Participant created successfully", body = ParticipantResponse),
        (status = 400, description = "Malformed body or validation error", body = raffle_storage::dto::common::ValidationErrorResponse)
    ),
    tag = "participants"
)]
pub async fn create_participant(
    State(db): State<Database>,
    body: Result<Json<Value>, JsonRejection>,
) -> WebResult<Response> {
    let Json(body) = body.map_err(|rejection| WebError::BadRequest(rejection.body_text()))?;
    let req = CreateParticipantRequest::from_value(&body)?;

    let participant = services::create_participant(&*db.participants(), &req).await?;

    Ok((StatusCode::CREATED, Json(ParticipantResponse::from(participant))).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/participants/{id}/",
    params(
        ("id" = i64, Path, description = "Participant id")
    ),
    responses(
        (status = 204, description = "Participant deleted successfully"),
        (status = 404, description = "Participant not found", body = raffle_storage::dto::common::ErrorResponse)
    ),
    tag = "participants"
)]
pub async fn delete_participant(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> WebResult<Response> {
    services::delete_participant(&*db.participants(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
