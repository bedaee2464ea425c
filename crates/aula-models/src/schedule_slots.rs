//! Schedule slot (franja horaria) models.
//!
//! Slots belong to an institution and carry a derived duration in minutes;
//! the duration is computed from the stored times, never stored itself.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScheduleSlot {
    pub id: Uuid,
    pub institucion_id: Uuid,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
    pub duracion_minutos: i64,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[sqlx(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Minutes between two times of day; negative when `fin` precedes `inicio`.
pub fn duration_minutes(inicio: NaiveTime, fin: NaiveTime) -> i64 {
    (fin - inicio).num_minutes()
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateScheduleSlotDto {
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateScheduleSlotDto {
    pub hora_inicio: Option<NaiveTime>,
    pub hora_fin: Option<NaiveTime>,
}
