//! Institution (institución educativa) models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// An educational institution. The crest image is uploaded separately and
/// stored as a public URL.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Institution {
    pub id: Uuid,
    pub nombre: String,
    pub codigo_dane: String,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub correo: Option<String>,
    pub escudo_url: Option<String>,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[sqlx(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateInstitutionDto {
    #[validate(length(min = 1, max = 150))]
    pub nombre: String,
    /// DANE registration code
    #[validate(length(min = 5, max = 12))]
    pub codigo_dane: String,
    #[validate(length(max = 200))]
    pub direccion: Option<String>,
    #[validate(length(max = 20))]
    pub telefono: Option<String>,
    #[validate(email)]
    pub correo: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateInstitutionDto {
    #[validate(length(min = 1, max = 150))]
    pub nombre: Option<String>,
    #[validate(length(min = 5, max = 12))]
    pub codigo_dane: Option<String>,
    #[validate(length(max = 200))]
    pub direccion: Option<String>,
    #[validate(length(max = 20))]
    pub telefono: Option<String>,
    #[validate(email)]
    pub correo: Option<String>,
}
