//! Guardian (acudiente) models. A guardian is attached to one student.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Guardian {
    pub id: Uuid,
    pub nombres: String,
    pub apellidos: String,
    pub documento: String,
    pub telefono: String,
    pub correo: Option<String>,
    pub parentesco: String,
    pub estudiante_id: Uuid,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[sqlx(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateGuardianDto {
    #[validate(length(min = 1, max = 100))]
    pub nombres: String,
    #[validate(length(min = 1, max = 100))]
    pub apellidos: String,
    #[validate(length(min = 5, max = 20))]
    pub documento: String,
    #[validate(length(min = 7, max = 20))]
    pub telefono: String,
    #[validate(email)]
    pub correo: Option<String>,
    /// madre, padre, abuelo, tutor...
    #[validate(length(min = 1, max = 40))]
    pub parentesco: String,
    pub estudiante_id: Uuid,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateGuardianDto {
    #[validate(length(min = 1, max = 100))]
    pub nombres: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub apellidos: Option<String>,
    #[validate(length(min = 5, max = 20))]
    pub documento: Option<String>,
    #[validate(length(min = 7, max = 20))]
    pub telefono: Option<String>,
    #[validate(email)]
    pub correo: Option<String>,
    #[validate(length(min = 1, max = 40))]
    pub parentesco: Option<String>,
    pub estudiante_id: Option<Uuid>,
}
