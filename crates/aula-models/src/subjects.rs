//! Subject (asignatura) models. A subject belongs to an area.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subject {
    pub id: Uuid,
    pub nombre: String,
    pub area_id: Uuid,
    pub horas_semanales: i32,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[sqlx(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateSubjectDto {
    #[validate(length(min = 1, max = 120))]
    pub nombre: String,
    pub area_id: Uuid,
    #[validate(range(min = 1, max = 40))]
    pub horas_semanales: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateSubjectDto {
    #[validate(length(min = 1, max = 120))]
    pub nombre: Option<String>,
    pub area_id: Option<Uuid>,
    #[validate(range(min = 1, max = 40))]
    pub horas_semanales: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekly_hours_bounds() {
        let mut dto = CreateSubjectDto {
            nombre: "Matemáticas".to_string(),
            area_id: Uuid::new_v4(),
            horas_semanales: 5,
        };
        assert!(dto.validate().is_ok());
        dto.horas_semanales = 0;
        assert!(dto.validate().is_err());
        dto.horas_semanales = 41;
        assert!(dto.validate().is_err());
    }
}
