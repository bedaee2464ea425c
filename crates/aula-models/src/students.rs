//! Student (estudiante) models and DTOs.
//!
//! Enrollment is the nullable `grupo_id`; transferring a student between
//! groups goes through the groups module's transfer operation rather than a
//! plain update.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const STUDENT_STATES: [&str; 3] = ["activo", "retirado", "egresado"];

fn validate_student_state(estado: &str) -> Result<(), ValidationError> {
    if STUDENT_STATES.contains(&estado) {
        Ok(())
    } else {
        let mut error = ValidationError::new("estado");
        error.message = Some("estado must be one of: activo, retirado, egresado".into());
        Err(error)
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub nombres: String,
    pub apellidos: String,
    pub documento: String,
    pub fecha_nacimiento: Option<NaiveDate>,
    pub correo: Option<String>,
    pub grupo_id: Option<Uuid>,
    pub estado: String,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[sqlx(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 100))]
    pub nombres: String,
    #[validate(length(min = 1, max = 100))]
    pub apellidos: String,
    #[validate(length(min = 5, max = 20))]
    pub documento: String,
    pub fecha_nacimiento: Option<NaiveDate>,
    #[validate(email)]
    pub correo: Option<String>,
    pub grupo_id: Option<Uuid>,
    #[validate(custom(function = validate_student_state))]
    pub estado: String,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 100))]
    pub nombres: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub apellidos: Option<String>,
    #[validate(length(min = 5, max = 20))]
    pub documento: Option<String>,
    pub fecha_nacimiento: Option<NaiveDate>,
    #[validate(email)]
    pub correo: Option<String>,
    pub grupo_id: Option<Uuid>,
    #[validate(custom(function = validate_student_state))]
    pub estado: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> CreateStudentDto {
        CreateStudentDto {
            nombres: "Ana María".to_string(),
            apellidos: "García López".to_string(),
            documento: "1020304050".to_string(),
            fecha_nacimiento: NaiveDate::from_ymd_opt(2012, 3, 14),
            correo: Some("ana.garcia@example.com".to_string()),
            grupo_id: None,
            estado: "activo".to_string(),
        }
    }

    #[test]
    fn test_create_dto_valid() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_short_document() {
        let mut dto = valid_dto();
        dto.documento = "123".to_string();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("documento"));
    }

    #[test]
    fn test_create_dto_rejects_unknown_state() {
        let mut dto = valid_dto();
        dto.estado = "suspendido".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_dto_empty_is_valid() {
        assert!(UpdateStudentDto::default().validate().is_ok());
    }

    #[test]
    fn test_update_dto_validates_provided_fields_only() {
        let dto = UpdateStudentDto {
            correo: Some("bad-email".to_string()),
            ..Default::default()
        };
        let errors = dto.validate().unwrap_err();
        let fields: Vec<_> = errors.field_errors().keys().cloned().collect();
        assert_eq!(fields, vec!["correo"]);
    }
}
