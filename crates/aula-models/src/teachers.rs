//! Teacher (docente) models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: Uuid,
    pub nombres: String,
    pub apellidos: String,
    pub documento: String,
    pub correo: String,
    pub especialidad: Option<String>,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[sqlx(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTeacherDto {
    #[validate(length(min = 1, max = 100))]
    pub nombres: String,
    #[validate(length(min = 1, max = 100))]
    pub apellidos: String,
    #[validate(length(min = 5, max = 20))]
    pub documento: String,
    #[validate(email)]
    pub correo: String,
    #[validate(length(max = 120))]
    pub especialidad: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateTeacherDto {
    #[validate(length(min = 1, max = 100))]
    pub nombres: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub apellidos: Option<String>,
    #[validate(length(min = 5, max = 20))]
    pub documento: Option<String>,
    #[validate(email)]
    pub correo: Option<String>,
    #[validate(length(max = 120))]
    pub especialidad: Option<String>,
}
