//! Academic year (año lectivo) and period (periodo) models.
//!
//! Periods belong to a year; their dates must fall inside the year's range.
//! The date-containment rules are enforced by the service layer so that the
//! failures come back as field-keyed validation errors.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const YEAR_STATES: [&str; 3] = ["planeado", "activo", "cerrado"];

fn validate_year_state(estado: &str) -> Result<(), ValidationError> {
    if YEAR_STATES.contains(&estado) {
        Ok(())
    } else {
        let mut error = ValidationError::new("estado");
        error.message = Some("estado must be one of: planeado, activo, cerrado".into());
        Err(error)
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AcademicYear {
    pub id: Uuid,
    pub anio: i32,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub estado: String,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[sqlx(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateAcademicYearDto {
    #[validate(range(min = 2000, max = 2100))]
    pub anio: i32,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    #[validate(custom(function = validate_year_state))]
    pub estado: String,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateAcademicYearDto {
    #[validate(range(min = 2000, max = 2100))]
    pub anio: Option<i32>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
    #[validate(custom(function = validate_year_state))]
    pub estado: Option<String>,
}

/// A grading period inside an academic year.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Period {
    pub id: Uuid,
    pub anio_id: Uuid,
    pub nombre: String,
    pub numero: i32,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[sqlx(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreatePeriodDto {
    #[validate(length(min = 1, max = 80))]
    pub nombre: String,
    #[validate(range(min = 1, max = 12))]
    pub numero: i32,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdatePeriodDto {
    #[validate(length(min = 1, max = 80))]
    pub nombre: Option<String>,
    #[validate(range(min = 1, max = 12))]
    pub numero: Option<i32>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_year_valid() {
        let dto = CreateAcademicYearDto {
            anio: 2026,
            fecha_inicio: date(2026, 1, 20),
            fecha_fin: date(2026, 11, 28),
            estado: "planeado".to_string(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_year_rejects_unknown_state() {
        let dto = CreateAcademicYearDto {
            anio: 2026,
            fecha_inicio: date(2026, 1, 20),
            fecha_fin: date(2026, 11, 28),
            estado: "pendiente".to_string(),
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("estado"));
    }

    #[test]
    fn test_create_year_rejects_out_of_range_year() {
        let dto = CreateAcademicYearDto {
            anio: 1995,
            fecha_inicio: date(1995, 1, 20),
            fecha_fin: date(1995, 11, 28),
            estado: "cerrado".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_period_rejects_zero_ordinal() {
        let dto = CreatePeriodDto {
            nombre: "Primer periodo".to_string(),
            numero: 0,
            fecha_inicio: date(2026, 1, 20),
            fecha_fin: date(2026, 4, 3),
        };
        assert!(dto.validate().is_err());
    }
}
