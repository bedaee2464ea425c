//! Grade (grado) models. Ordinal gives grades their natural ordering.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Grade {
    pub id: Uuid,
    pub nombre: String,
    pub ordinal: i32,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[sqlx(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateGradeDto {
    #[validate(length(min = 1, max = 80))]
    pub nombre: String,
    #[validate(range(min = 0, max = 15))]
    pub ordinal: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateGradeDto {
    #[validate(length(min = 1, max = 80))]
    pub nombre: Option<String>,
    #[validate(range(min = 0, max = 15))]
    pub ordinal: Option<i32>,
}
