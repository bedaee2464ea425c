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

use crate::modules::campuses::model::{Campus, CreateCampusDto, UpdateCampusDto};
use crate::modules::campuses::service::CampusService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CampusFilter {
    /// Restrict the listing to one institution's campuses
    pub institucion_id: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/sedes",
    request_body = CreateCampusDto,
    responses(
        (status = 201, description = "Campus created", body = Campus),
        (status = 422, description = "Validation failed"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Campuses"
)]
#[instrument(skip(state, dto))]
pub async fn create_campus(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCampusDto>,
) -> Result<(StatusCode, Json<Campus>), AppError> {
    let campus = CampusService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(campus)))
}

#[utoipa::path(
    get,
    path = "/api/sedes",
    params(ListQuery, CampusFilter),
    responses(
        (status = 200, description = "Paginated campuses", body = Paginated<Campus>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Campuses"
)]
#[instrument(skip(state))]
pub async fn get_campuses(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    Query(filter): Query<CampusFilter>,
) -> Result<Json<Paginated<Campus>>, AppError> {
    let page = CampusService::list(&state.db, &query, filter.institucion_id).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/sedes/{id}",
    params(("id" = Uuid, Path, description = "Campus ID")),
    responses(
        (status = 200, description = "Campus details", body = Campus),
        (status = 404, description = "Campus not found", body = ErrorResponse)
    ),
    tag = "Campuses"
)]
#[instrument(skip(state))]
pub async fn get_campus(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Campus>, AppError> {
    let campus = CampusService::get(&state.db, id).await?;
    Ok(Json(campus))
}

#[utoipa::path(
    put,
    path = "/api/sedes/{id}",
    params(("id" = Uuid, Path, description = "Campus ID")),
    request_body = UpdateCampusDto,
    responses(
        (status = 200, description = "Campus updated", body = Campus),
        (status = 404, description = "Campus not found", body = ErrorResponse),
        (status = 422, description = "Validation failed")
    ),
    tag = "Campuses"
)]
#[instrument(skip(state, dto))]
pub async fn update_campus(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCampusDto>,
) -> Result<Json<Campus>, AppError> {
    let campus = CampusService::update(&state.db, id, dto).await?;
    Ok(Json(campus))
}

#[utoipa::path(
    delete,
    path = "/api/sedes/{id}",
    params(("id" = Uuid, Path, description = "Campus ID")),
    responses(
        (status = 204, description = "Campus deleted"),
        (status = 404, description = "Campus not found", body = ErrorResponse),
        (status = 409, description = "Campus is still referenced", body = ErrorResponse)
    ),
    tag = "Campuses"
)]
#[instrument(skip(state))]
pub async fn delete_campus(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    CampusService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
