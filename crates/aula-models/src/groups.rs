//! Group (grupo) models and DTOs.
//!
//! A group is one section of a grade, at a campus, within an academic year.
//! `GroupDetail` is the detail-page shape: the group plus its enrollment
//! count and occupancy percentage against `cupo_maximo`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Group {
    pub id: Uuid,
    pub nombre: String,
    pub grado_id: Uuid,
    pub sede_id: Uuid,
    pub anio_id: Uuid,
    pub cupo_maximo: i32,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[sqlx(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Group with enrollment figures, returned by the detail endpoint.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GroupDetail {
    pub id: Uuid,
    pub nombre: String,
    pub grado_id: Uuid,
    pub sede_id: Uuid,
    pub anio_id: Uuid,
    pub cupo_maximo: i32,
    pub estudiantes_count: i64,
    pub ocupacion: f64,
}

impl GroupDetail {
    /// Occupancy percentage, 0.0 when the group has no capacity.
    pub fn occupancy_pct(estudiantes_count: i64, cupo_maximo: i32) -> f64 {
        if cupo_maximo <= 0 {
            0.0
        } else {
            (estudiantes_count as f64 / cupo_maximo as f64) * 100.0
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateGroupDto {
    #[validate(length(min = 1, max = 80))]
    pub nombre: String,
    pub grado_id: Uuid,
    pub sede_id: Uuid,
    pub anio_id: Uuid,
    #[validate(range(min = 1, max = 200))]
    pub cupo_maximo: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateGroupDto {
    #[validate(length(min = 1, max = 80))]
    pub nombre: Option<String>,
    pub grado_id: Option<Uuid>,
    pub sede_id: Option<Uuid>,
    pub anio_id: Option<Uuid>,
    #[validate(range(min = 1, max = 200))]
    pub cupo_maximo: Option<i32>,
}

/// Body of `PUT /grupos/{id}/estudiantes/{estudiante_id}/trasladar`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransferStudentDto {
    pub grupo_destino_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupancy_pct() {
        assert_eq!(GroupDetail::occupancy_pct(20, 40), 50.0);
        assert_eq!(GroupDetail::occupancy_pct(0, 40), 0.0);
        assert_eq!(GroupDetail::occupancy_pct(40, 40), 100.0);
        // Degenerate capacity never divides by zero
        assert_eq!(GroupDetail::occupancy_pct(5, 0), 0.0);
    }

    #[test]
    fn test_create_group_requires_positive_capacity() {
        let dto = CreateGroupDto {
            nombre: "10A".to_string(),
            grado_id: Uuid::new_v4(),
            sede_id: Uuid::new_v4(),
            anio_id: Uuid::new_v4(),
            cupo_maximo: 0,
        };
        assert!(dto.validate().is_err());
    }
}
