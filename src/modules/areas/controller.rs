use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use aula_core::pagination::{ListQuery, Paginated};

use crate::modules::areas::model::{Area, CreateAreaDto, UpdateAreaDto};
use crate::modules::areas::service::AreaService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/areas",
    request_body = CreateAreaDto,
    responses(
        (status = 201, description = "Area created", body = Area),
        (status = 422, description = "Validation failed")
    ),
    tag = "Areas"
)]
#[instrument(skip(state, dto))]
pub async fn create_area(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAreaDto>,
) -> Result<(StatusCode, Json<Area>), AppError> {
    let area = AreaService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(area)))
}

#[utoipa::path(
    get,
    path = "/api/areas",
    params(ListQuery),
    responses((status = 200, description = "Paginated areas", body = Paginated<Area>)),
    tag = "Areas"
)]
#[instrument(skip(state))]
pub async fn get_areas(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<Area>>, AppError> {
    let page = AreaService::list(&state.db, &query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/areas/{id}",
    params(("id" = Uuid, Path, description = "Area ID")),
    responses(
        (status = 200, description = "Area details", body = Area),
        (status = 404, description = "Area not found", body = ErrorResponse)
    ),
    tag = "Areas"
)]
#[instrument(skip(state))]
pub async fn get_area(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Area>, AppError> {
    let area = AreaService::get(&state.db, id).await?;
    Ok(Json(area))
}

#[utoipa::path(
    put,
    path = "/api/areas/{id}",
    params(("id" = Uuid, Path, description = "Area ID")),
    request_body = UpdateAreaDto,
    responses(
        (status = 200, description = "Area updated", body = Area),
        (status = 404, description = "Area not found", body = ErrorResponse)
    ),
    tag = "Areas"
)]
#[instrument(skip(state, dto))]
pub async fn update_area(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAreaDto>,
) -> Result<Json<Area>, AppError> {
    let area = AreaService::update(&state.db, id, dto).await?;
    Ok(Json(area))
}

#[utoipa::path(
    delete,
    path = "/api/areas/{id}",
    params(("id" = Uuid, Path, description = "Area ID")),
    responses(
        (status = 204, description = "Area deleted"),
        (status = 404, description = "Area not found", body = ErrorResponse),
        (status = 409, description = "Area is still referenced", body = ErrorResponse)
    ),
    tag = "Areas"
)]
#[instrument(skip(state))]
pub async fn delete_area(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AreaService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
