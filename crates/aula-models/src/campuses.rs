//! Campus (sede) models and DTOs. A campus belongs to one institution.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Campus {
    pub id: Uuid,
    pub nombre: String,
    pub direccion: Option<String>,
    pub institucion_id: Uuid,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[sqlx(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCampusDto {
    #[validate(length(min = 1, max = 150))]
    pub nombre: String,
    #[validate(length(max = 200))]
    pub direccion: Option<String>,
    pub institucion_id: Uuid,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateCampusDto {
    #[validate(length(min = 1, max = 150))]
    pub nombre: Option<String>,
    #[validate(length(max = 200))]
    pub direccion: Option<String>,
    pub institucion_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dto_requires_name() {
        let dto = CreateCampusDto {
            nombre: String::new(),
            direccion: None,
            institucion_id: Uuid::new_v4(),
        };
        assert!(dto.validate().is_err());
    }
}
