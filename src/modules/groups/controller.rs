use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use utoipa::IntoParams;
use uuid::Uuid;

use aula_core::pagination::{ListQuery, Paginated};

use crate::modules::groups::model::{
    CreateGroupDto, Group, GroupDetail, TransferStudentDto, UpdateGroupDto,
};
use crate::modules::groups::service::GroupService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct GroupFilter {
    pub anio_id: Option<Uuid>,
    pub grado_id: Option<Uuid>,
    pub sede_id: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/grupos",
    request_body = CreateGroupDto,
    responses(
        (status = 201, description = "Group created", body = Group),
        (status = 422, description = "Validation failed")
    ),
    tag = "Groups"
)]
#[instrument(skip(state, dto))]
pub async fn create_group(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateGroupDto>,
) -> Result<(StatusCode, Json<Group>), AppError> {
    let group = GroupService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    get,
    path = "/api/grupos",
    params(ListQuery, GroupFilter),
    responses((status = 200, description = "Paginated groups", body = Paginated<Group>)),
    tag = "Groups"
)]
#[instrument(skip(state))]
pub async fn get_groups(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    Query(filter): Query<GroupFilter>,
) -> Result<Json<Paginated<Group>>, AppError> {
    let page = GroupService::list(
        &state.db,
        &query,
        filter.anio_id,
        filter.grado_id,
        filter.sede_id,
    )
    .await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/grupos/{id}",
    params(("id" = Uuid, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group with enrollment figures", body = GroupDetail),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    tag = "Groups"
)]
#[instrument(skip(state))]
pub async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GroupDetail>, AppError> {
    let detail = GroupService::get_detail(&state.db, id).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    put,
    path = "/api/grupos/{id}",
    params(("id" = Uuid, Path, description = "Group ID")),
    request_body = UpdateGroupDto,
    responses(
        (status = 200, description = "Group updated", body = Group),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 422, description = "Validation failed")
    ),
    tag = "Groups"
)]
#[instrument(skip(state, dto))]
pub async fn update_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateGroupDto>,
) -> Result<Json<Group>, AppError> {
    let group = GroupService::update(&state.db, id, dto).await?;
    Ok(Json(group))
}

#[utoipa::path(
    delete,
    path = "/api/grupos/{id}",
    params(("id" = Uuid, Path, description = "Group ID")),
    responses(
        (status = 204, description = "Group deleted; its students become unassigned"),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    tag = "Groups"
)]
#[instrument(skip(state))]
pub async fn delete_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    GroupService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/api/grupos/{id}/estudiantes/{estudiante_id}/trasladar",
    params(
        ("id" = Uuid, Path, description = "Source group ID"),
        ("estudiante_id" = Uuid, Path, description = "Student ID")
    ),
    request_body = TransferStudentDto,
    responses(
        (status = 200, description = "Student transferred"),
        (status = 404, description = "Group or enrollment not found", body = ErrorResponse),
        (status = 422, description = "Destination rejected")
    ),
    tag = "Groups"
)]
#[instrument(skip(state))]
pub async fn transfer_student(
    State(state): State<AppState>,
    Path((id, estudiante_id)): Path<(Uuid, Uuid)>,
    Json(dto): Json<TransferStudentDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    GroupService::transfer_student(&state.db, id, estudiante_id, dto.grupo_destino_id).await?;
    Ok(Json(json!({ "message": "Student transferred successfully" })))
}
