use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use aula_core::pagination::{ListQuery, Paginated};

use crate::modules::academic_years::model::{
    AcademicYear, CreateAcademicYearDto, CreatePeriodDto, Period, UpdateAcademicYearDto,
    UpdatePeriodDto,
};
use crate::modules::academic_years::service::AcademicYearService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/anios",
    request_body = CreateAcademicYearDto,
    responses(
        (status = 201, description = "Academic year created", body = AcademicYear),
        (status = 422, description = "Validation failed")
    ),
    tag = "Academic years"
)]
#[instrument(skip(state, dto))]
pub async fn create_year(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAcademicYearDto>,
) -> Result<(StatusCode, Json<AcademicYear>), AppError> {
    let year = AcademicYearService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(year)))
}

#[utoipa::path(
    get,
    path = "/api/anios",
    params(ListQuery),
    responses((status = 200, description = "Paginated academic years", body = Paginated<AcademicYear>)),
    tag = "Academic years"
)]
#[instrument(skip(state))]
pub async fn get_years(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<AcademicYear>>, AppError> {
    let page = AcademicYearService::list(&state.db, &query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/anios/{id}",
    params(("id" = Uuid, Path, description = "Academic year ID")),
    responses(
        (status = 200, description = "Academic year details", body = AcademicYear),
        (status = 404, description = "Academic year not found", body = ErrorResponse)
    ),
    tag = "Academic years"
)]
#[instrument(skip(state))]
pub async fn get_year(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AcademicYear>, AppError> {
    let year = AcademicYearService::get(&state.db, id).await?;
    Ok(Json(year))
}

#[utoipa::path(
    put,
    path = "/api/anios/{id}",
    params(("id" = Uuid, Path, description = "Academic year ID")),
    request_body = UpdateAcademicYearDto,
    responses(
        (status = 200, description = "Academic year updated", body = AcademicYear),
        (status = 404, description = "Academic year not found", body = ErrorResponse),
        (status = 422, description = "Validation failed")
    ),
    tag = "Academic years"
)]
#[instrument(skip(state, dto))]
pub async fn update_year(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAcademicYearDto>,
) -> Result<Json<AcademicYear>, AppError> {
    let year = AcademicYearService::update(&state.db, id, dto).await?;
    Ok(Json(year))
}

#[utoipa::path(
    delete,
    path = "/api/anios/{id}",
    params(("id" = Uuid, Path, description = "Academic year ID")),
    responses(
        (status = 204, description = "Academic year deleted"),
        (status = 404, description = "Academic year not found", body = ErrorResponse),
        (status = 409, description = "Academic year is still referenced", body = ErrorResponse)
    ),
    tag = "Academic years"
)]
#[instrument(skip(state))]
pub async fn delete_year(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AcademicYearService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/anios/{anio_id}/periodos",
    params(("anio_id" = Uuid, Path, description = "Academic year ID")),
    responses(
        (status = 200, description = "Periods of the year, ordered by numero", body = [Period]),
        (status = 404, description = "Academic year not found", body = ErrorResponse)
    ),
    tag = "Academic years"
)]
#[instrument(skip(state))]
pub async fn get_periods(
    State(state): State<AppState>,
    Path(anio_id): Path<Uuid>,
) -> Result<Json<Vec<Period>>, AppError> {
    let periods = AcademicYearService::list_periods(&state.db, anio_id).await?;
    Ok(Json(periods))
}

#[utoipa::path(
    get,
    path = "/api/anios/{anio_id}/periodos/{periodo_id}",
    params(
        ("anio_id" = Uuid, Path, description = "Academic year ID"),
        ("periodo_id" = Uuid, Path, description = "Period ID")
    ),
    responses(
        (status = 200, description = "Period details", body = Period),
        (status = 404, description = "Period not found", body = ErrorResponse)
    ),
    tag = "Academic years"
)]
#[instrument(skip(state))]
pub async fn get_period(
    State(state): State<AppState>,
    Path((anio_id, periodo_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Period>, AppError> {
    let period = AcademicYearService::get_period(&state.db, anio_id, periodo_id).await?;
    Ok(Json(period))
}

#[utoipa::path(
    post,
    path = "/api/anios/{anio_id}/periodos",
    params(("anio_id" = Uuid, Path, description = "Academic year ID")),
    request_body = CreatePeriodDto,
    responses(
        (status = 201, description = "Period created", body = Period),
        (status = 404, description = "Academic year not found", body = ErrorResponse),
        (status = 422, description = "Validation failed")
    ),
    tag = "Academic years"
)]
#[instrument(skip(state, dto))]
pub async fn create_period(
    State(state): State<AppState>,
    Path(anio_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreatePeriodDto>,
) -> Result<(StatusCode, Json<Period>), AppError> {
    let period = AcademicYearService::create_period(&state.db, anio_id, dto).await?;
    Ok((StatusCode::CREATED, Json(period)))
}

#[utoipa::path(
    put,
    path = "/api/anios/{anio_id}/periodos/{periodo_id}",
    params(
        ("anio_id" = Uuid, Path, description = "Academic year ID"),
        ("periodo_id" = Uuid, Path, description = "Period ID")
    ),
    request_body = UpdatePeriodDto,
    responses(
        (status = 200, description = "Period updated", body = Period),
        (status = 404, description = "Period not found", body = ErrorResponse),
        (status = 422, description = "Validation failed")
    ),
    tag = "Academic years"
)]
#[instrument(skip(state, dto))]
pub async fn update_period(
    State(state): State<AppState>,
    Path((anio_id, periodo_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(dto): ValidatedJson<UpdatePeriodDto>,
) -> Result<Json<Period>, AppError> {
    let period =
        AcademicYearService::update_period(&state.db, anio_id, periodo_id, dto).await?;
    Ok(Json(period))
}

#[utoipa::path(
    delete,
    path = "/api/anios/{anio_id}/periodos/{periodo_id}",
    params(
        ("anio_id" = Uuid, Path, description = "Academic year ID"),
        ("periodo_id" = Uuid, Path, description = "Period ID")
    ),
    responses(
        (status = 204, description = "Period deleted"),
        (status = 404, description = "Period not found", body = ErrorResponse)
    ),
    tag = "Academic years"
)]
#[instrument(skip(state))]
pub async fn delete_period(
    State(state): State<AppState>,
    Path((anio_id, periodo_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    AcademicYearService::delete_period(&state.db, anio_id, periodo_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
