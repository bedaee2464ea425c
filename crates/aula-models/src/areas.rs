//! Area (área académica) models. Subjects group under areas.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Area {
    pub id: Uuid,
    pub nombre: String,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[sqlx(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateAreaDto {
    #[validate(length(min = 1, max = 120))]
    pub nombre: String,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateAreaDto {
    #[validate(length(min = 1, max = 120))]
    pub nombre: Option<String>,
}
