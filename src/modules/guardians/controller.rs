use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;
use uuid::Uuid;

use aula_core::pagination::{ListQuery, Paginated};

use crate::modules::guardians::model::{CreateGuardianDto, Guardian, UpdateGuardianDto};
use crate::modules::guardians::service::GuardianService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct GuardianFilter {
    /// Restrict the listing to one student's guardians
    pub estudiante_id: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/acudientes",
    request_body = CreateGuardianDto,
    responses(
        (status = 201, description = "Guardian created", body = Guardian),
        (status = 422, description = "Validation failed")
    ),
    tag = "Guardians"
)]
#[instrument(skip(state, dto))]
pub async fn create_guardian(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateGuardianDto>,
) -> Result<(StatusCode, Json<Guardian>), AppError> {
    let guardian = GuardianService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(guardian)))
}

#[utoipa::path(
    get,
    path = "/api/acudientes",
    params(ListQuery, GuardianFilter),
    responses((status = 200, description = "Paginated guardians", body = Paginated<Guardian>)),
    tag = "Guardians"
)]
#[instrument(skip(state))]
pub async fn get_guardians(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    Query(filter): Query<GuardianFilter>,
) -> Result<Json<Paginated<Guardian>>, AppError> {
    let page = GuardianService::list(&state.db, &query, filter.estudiante_id).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/acudientes/{id}",
    params(("id" = Uuid, Path, description = "Guardian ID")),
    responses(
        (status = 200, description = "Guardian details", body = Guardian),
        (status = 404, description = "Guardian not found", body = ErrorResponse)
    ),
    tag = "Guardians"
)]
#[instrument(skip(state))]
pub async fn get_guardian(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Guardian>, AppError> {
    let guardian = GuardianService::get(&state.db, id).await?;
    Ok(Json(guardian))
}

#[utoipa::path(
    put,
    path = "/api/acudientes/{id}",
    params(("id" = Uuid, Path, description = "Guardian ID")),
    request_body = UpdateGuardianDto,
    responses(
        (status = 200, description = "Guardian updated", body = Guardian),
        (status = 404, description = "Guardian not found", body = ErrorResponse)
    ),
    tag = "Guardians"
)]
#[instrument(skip(state, dto))]
pub async fn update_guardian(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateGuardianDto>,
) -> Result<Json<Guardian>, AppError> {
    let guardian = GuardianService::update(&state.db, id, dto).await?;
    Ok(Json(guardian))
}

#[utoipa::path(
    delete,
    path = "/api/acudientes/{id}",
    params(("id" = Uuid, Path, description = "Guardian ID")),
    responses(
        (status = 204, description = "Guardian deleted"),
        (status = 404, description = "Guardian not found", body = ErrorResponse)
    ),
    tag = "Guardians"
)]
#[instrument(skip(state))]
pub async fn delete_guardian(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    GuardianService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
