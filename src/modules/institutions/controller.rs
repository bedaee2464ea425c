use axum::{
    Json,
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::{StatusCode, header},
};
use serde_json::{Map, Value};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use aula_core::pagination::{ListQuery, Paginated};
use aula_core::storage::check_image_type;

use crate::modules::institutions::model::{
    CreateInstitutionDto, Institution, UpdateInstitutionDto,
};
use crate::modules::institutions::service::InstitutionService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::{ValidatedJson, field_error_map};

/// An uploaded crest image part.
struct CrestUpload {
    bytes: Vec<u8>,
    extension: &'static str,
}

/// Everything a multipart institution form can carry: scalar fields, the
/// optional crest image, and the `_method` override used by update flows.
struct InstitutionForm {
    fields: Map<String, Value>,
    crest: Option<CrestUpload>,
    method_override: Option<String>,
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

async fn read_institution_form(mut multipart: Multipart) -> Result<InstitutionForm, AppError> {
    let mut fields = Map::new();
    let mut crest = None;
    let mut method_override = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "escudo" => {
                let content_type = field.content_type().unwrap_or("").to_string();
                check_image_type(&content_type)
                    .map_err(|e| AppError::bad_request(anyhow::Error::new(e)))?;
                let extension = match content_type.as_str() {
                    "image/png" => "png",
                    "image/jpeg" => "jpg",
                    _ => "webp",
                };
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid upload: {e}")))?
                    .to_vec();
                crest = Some(CrestUpload { bytes, extension });
            }
            "_method" => {
                method_override = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid field: {e}")))?,
                );
            }
            _ => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid field: {e}")))?;
                if !text.is_empty() {
                    fields.insert(name, Value::String(text));
                }
            }
        }
    }

    Ok(InstitutionForm {
        fields,
        crest,
        method_override,
    })
}

/// Persist an uploaded crest and return its public URL.
async fn store_crest(state: &AppState, crest: CrestUpload) -> Result<String, AppError> {
    let key = format!("escudos/{}.{}", Uuid::new_v4(), crest.extension);
    state
        .files
        .save(&key, &crest.bytes)
        .await
        .map_err(|e| AppError::bad_request(anyhow::Error::new(e)))?;
    Ok(state.files.public_url(&key))
}

#[utoipa::path(
    post,
    path = "/api/instituciones",
    request_body = CreateInstitutionDto,
    responses(
        (status = 201, description = "Institution created", body = Institution),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 422, description = "Validation failed"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Institutions"
)]
pub async fn create_institution(
    State(state): State<AppState>,
    req: Request,
) -> Result<(StatusCode, Json<Institution>), AppError> {
    let institution = if is_multipart(&req) {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid multipart body: {e}")))?;
        let form = read_institution_form(multipart).await?;

        let dto: CreateInstitutionDto = serde_json::from_value(Value::Object(form.fields))
            .map_err(|e| AppError::bad_request(anyhow::anyhow!("{e}")))?;
        dto.validate()
            .map_err(|errors| AppError::unprocessable(field_error_map(&errors)))?;

        let escudo_url = match form.crest {
            Some(crest) => Some(store_crest(&state, crest).await?),
            None => None,
        };
        InstitutionService::create(&state.db, dto, escudo_url).await?
    } else {
        let ValidatedJson(dto) =
            ValidatedJson::<CreateInstitutionDto>::from_request(req, &()).await?;
        InstitutionService::create(&state.db, dto, None).await?
    };

    Ok((StatusCode::CREATED, Json(institution)))
}

#[utoipa::path(
    get,
    path = "/api/instituciones",
    params(ListQuery),
    responses(
        (status = 200, description = "Paginated institutions", body = Paginated<Institution>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Institutions"
)]
#[instrument(skip(state))]
pub async fn get_institutions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<Institution>>, AppError> {
    let page = InstitutionService::list(&state.db, &query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/instituciones/{id}",
    params(("id" = Uuid, Path, description = "Institution ID")),
    responses(
        (status = 200, description = "Institution details", body = Institution),
        (status = 404, description = "Institution not found", body = ErrorResponse)
    ),
    tag = "Institutions"
)]
#[instrument(skip(state))]
pub async fn get_institution(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Institution>, AppError> {
    let institution = InstitutionService::get(&state.db, id).await?;
    Ok(Json(institution))
}

#[utoipa::path(
    put,
    path = "/api/instituciones/{id}",
    params(("id" = Uuid, Path, description = "Institution ID")),
    request_body = UpdateInstitutionDto,
    responses(
        (status = 200, description = "Institution updated", body = Institution),
        (status = 404, description = "Institution not found", body = ErrorResponse),
        (status = 422, description = "Validation failed")
    ),
    tag = "Institutions"
)]
#[instrument(skip(state, dto))]
pub async fn update_institution(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateInstitutionDto>,
) -> Result<Json<Institution>, AppError> {
    let institution = InstitutionService::update(&state.db, id, dto, None).await?;
    Ok(Json(institution))
}

/// Multipart update: `POST /instituciones/{id}` with a `_method=PUT` field,
/// the shape browsers use when the form carries a crest file.
#[utoipa::path(
    post,
    path = "/api/instituciones/{id}",
    params(("id" = Uuid, Path, description = "Institution ID")),
    responses(
        (status = 200, description = "Institution updated", body = Institution),
        (status = 400, description = "Missing _method=PUT override", body = ErrorResponse),
        (status = 404, description = "Institution not found", body = ErrorResponse),
        (status = 422, description = "Validation failed")
    ),
    tag = "Institutions"
)]
pub async fn update_institution_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Institution>, AppError> {
    let form = read_institution_form(multipart).await?;

    if form.method_override.as_deref() != Some("PUT") {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "Multipart updates require a _method=PUT field"
        )));
    }

    let dto: UpdateInstitutionDto = serde_json::from_value(Value::Object(form.fields))
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("{e}")))?;
    dto.validate()
        .map_err(|errors| AppError::unprocessable(field_error_map(&errors)))?;

    let escudo_url = match form.crest {
        Some(crest) => Some(store_crest(&state, crest).await?),
        None => None,
    };

    let institution = InstitutionService::update(&state.db, id, dto, escudo_url).await?;
    Ok(Json(institution))
}

#[utoipa::path(
    delete,
    path = "/api/instituciones/{id}",
    params(("id" = Uuid, Path, description = "Institution ID")),
    responses(
        (status = 204, description = "Institution deleted"),
        (status = 404, description = "Institution not found", body = ErrorResponse)
    ),
    tag = "Institutions"
)]
#[instrument(skip(state))]
pub async fn delete_institution(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    InstitutionService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
