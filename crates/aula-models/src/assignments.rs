//! Teaching assignment (asignación académica) models.
//!
//! An assignment places a teacher and subject in a group at a schedule slot
//! on a given weekday. The database enforces that a group is not double-booked
//! for a slot/day, and neither is a teacher.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assignment {
    pub id: Uuid,
    pub grupo_id: Uuid,
    pub asignatura_id: Uuid,
    pub docente_id: Uuid,
    pub franja_id: Uuid,
    /// ISO weekday, 1 = Monday .. 7 = Sunday
    pub dia_semana: i16,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[sqlx(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateAssignmentDto {
    pub grupo_id: Uuid,
    pub asignatura_id: Uuid,
    pub docente_id: Uuid,
    pub franja_id: Uuid,
    #[validate(range(min = 1, max = 7))]
    pub dia_semana: i16,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateAssignmentDto {
    pub grupo_id: Option<Uuid>,
    pub asignatura_id: Option<Uuid>,
    pub docente_id: Option<Uuid>,
    pub franja_id: Option<Uuid>,
    #[validate(range(min = 1, max = 7))]
    pub dia_semana: Option<i16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_range() {
        let mut dto = CreateAssignmentDto {
            grupo_id: Uuid::new_v4(),
            asignatura_id: Uuid::new_v4(),
            docente_id: Uuid::new_v4(),
            franja_id: Uuid::new_v4(),
            dia_semana: 1,
        };
        assert!(dto.validate().is_ok());
        dto.dia_semana = 8;
        assert!(dto.validate().is_err());
        dto.dia_semana = 0;
        assert!(dto.validate().is_err());
    }
}
