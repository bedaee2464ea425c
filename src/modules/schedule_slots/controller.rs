use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::schedule_slots::model::{
    CreateScheduleSlotDto, ScheduleSlot, UpdateScheduleSlotDto,
};
use crate::modules::schedule_slots::service::ScheduleSlotService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/instituciones/{institucion_id}/franjas-horarias",
    params(("institucion_id" = Uuid, Path, description = "Institution ID")),
    responses(
        (status = 200, description = "Slots ordered by start time", body = [ScheduleSlot]),
        (status = 404, description = "Institution not found", body = ErrorResponse)
    ),
    tag = "Schedule slots"
)]
#[instrument(skip(state))]
pub async fn get_slots(
    State(state): State<AppState>,
    Path(institucion_id): Path<Uuid>,
) -> Result<Json<Vec<ScheduleSlot>>, AppError> {
    let slots = ScheduleSlotService::list(&state.db, institucion_id).await?;
    Ok(Json(slots))
}

#[utoipa::path(
    get,
    path = "/api/instituciones/{institucion_id}/franjas-horarias/{franja_id}",
    params(
        ("institucion_id" = Uuid, Path, description = "Institution ID"),
        ("franja_id" = Uuid, Path, description = "Slot ID")
    ),
    responses(
        (status = 200, description = "Slot details", body = ScheduleSlot),
        (status = 404, description = "Slot not found", body = ErrorResponse)
    ),
    tag = "Schedule slots"
)]
#[instrument(skip(state))]
pub async fn get_slot(
    State(state): State<AppState>,
    Path((institucion_id, franja_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ScheduleSlot>, AppError> {
    let slot = ScheduleSlotService::get(&state.db, institucion_id, franja_id).await?;
    Ok(Json(slot))
}

#[utoipa::path(
    post,
    path = "/api/instituciones/{institucion_id}/franjas-horarias",
    params(("institucion_id" = Uuid, Path, description = "Institution ID")),
    request_body = CreateScheduleSlotDto,
    responses(
        (status = 201, description = "Slot created", body = ScheduleSlot),
        (status = 404, description = "Institution not found", body = ErrorResponse),
        (status = 422, description = "Validation failed")
    ),
    tag = "Schedule slots"
)]
#[instrument(skip(state, dto))]
pub async fn create_slot(
    State(state): State<AppState>,
    Path(institucion_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateScheduleSlotDto>,
) -> Result<(StatusCode, Json<ScheduleSlot>), AppError> {
    let slot = ScheduleSlotService::create(&state.db, institucion_id, dto).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

#[utoipa::path(
    put,
    path = "/api/instituciones/{institucion_id}/franjas-horarias/{franja_id}",
    params(
        ("institucion_id" = Uuid, Path, description = "Institution ID"),
        ("franja_id" = Uuid, Path, description = "Slot ID")
    ),
    request_body = UpdateScheduleSlotDto,
    responses(
        (status = 200, description = "Slot updated", body = ScheduleSlot),
        (status = 404, description = "Slot not found", body = ErrorResponse),
        (status = 422, description = "Validation failed")
    ),
    tag = "Schedule slots"
)]
#[instrument(skip(state, dto))]
pub async fn update_slot(
    State(state): State<AppState>,
    Path((institucion_id, franja_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(dto): ValidatedJson<UpdateScheduleSlotDto>,
) -> Result<Json<ScheduleSlot>, AppError> {
    let slot = ScheduleSlotService::update(&state.db, institucion_id, franja_id, dto).await?;
    Ok(Json(slot))
}

#[utoipa::path(
    delete,
    path = "/api/instituciones/{institucion_id}/franjas-horarias/{franja_id}",
    params(
        ("institucion_id" = Uuid, Path, description = "Institution ID"),
        ("franja_id" = Uuid, Path, description = "Slot ID")
    ),
    responses(
        (status = 204, description = "Slot deleted"),
        (status = 404, description = "Slot not found", body = ErrorResponse),
        (status = 409, description = "Slot is still referenced", body = ErrorResponse)
    ),
    tag = "Schedule slots"
)]
#[instrument(skip(state))]
pub async fn delete_slot(
    State(state): State<AppState>,
    Path((institucion_id, franja_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    ScheduleSlotService::delete(&state.db, institucion_id, franja_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
