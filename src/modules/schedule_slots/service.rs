use anyhow::Context;
use chrono::NaiveTime;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::institutions::service::InstitutionService;
use crate::modules::schedule_slots::model::{
    CreateScheduleSlotDto, ScheduleSlot, UpdateScheduleSlotDto, duration_minutes,
};
use crate::utils::errors::{AppError, map_delete_error, map_sqlx_error};

// duracion_minutos is derived from the stored times on the way out
const COLUMNS: &str = "id, institucion_id, hora_inicio, hora_fin, \
    (EXTRACT(EPOCH FROM (hora_fin - hora_inicio)) / 60)::bigint AS duracion_minutos, \
    created_at, updated_at";

fn check_time_order(inicio: NaiveTime, fin: NaiveTime) -> Result<(), AppError> {
    if duration_minutes(inicio, fin) <= 0 {
        return Err(AppError::unprocessable_field(
            "hora_fin",
            "hora_fin must be after hora_inicio",
        ));
    }
    Ok(())
}

pub struct ScheduleSlotService;

impl ScheduleSlotService {
    /// Bare-array list of an institution's slots, ordered by start time.
    /// The console filters and sorts these locally.
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, institucion_id: Uuid) -> Result<Vec<ScheduleSlot>, AppError> {
        InstitutionService::get(db, institucion_id).await?;

        sqlx::query_as::<_, ScheduleSlot>(&format!(
            "SELECT {COLUMNS} FROM franjas_horarias WHERE institucion_id = $1 ORDER BY hora_inicio"
        ))
        .bind(institucion_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch schedule slots")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get(
        db: &PgPool,
        institucion_id: Uuid,
        franja_id: Uuid,
    ) -> Result<ScheduleSlot, AppError> {
        sqlx::query_as::<_, ScheduleSlot>(&format!(
            "SELECT {COLUMNS} FROM franjas_horarias WHERE id = $1 AND institucion_id = $2"
        ))
        .bind(franja_id)
        .bind(institucion_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch schedule slot")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Schedule slot not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        institucion_id: Uuid,
        dto: CreateScheduleSlotDto,
    ) -> Result<ScheduleSlot, AppError> {
        InstitutionService::get(db, institucion_id).await?;
        check_time_order(dto.hora_inicio, dto.hora_fin)?;

        sqlx::query_as::<_, ScheduleSlot>(&format!(
            r#"
            INSERT INTO franjas_horarias (institucion_id, hora_inicio, hora_fin)
            VALUES ($1, $2, $3)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(institucion_id)
        .bind(dto.hora_inicio)
        .bind(dto.hora_fin)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "franjas_horarias"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        institucion_id: Uuid,
        franja_id: Uuid,
        dto: UpdateScheduleSlotDto,
    ) -> Result<ScheduleSlot, AppError> {
        let existing = Self::get(db, institucion_id, franja_id).await?;

        let hora_inicio = dto.hora_inicio.unwrap_or(existing.hora_inicio);
        let hora_fin = dto.hora_fin.unwrap_or(existing.hora_fin);

        check_time_order(hora_inicio, hora_fin)?;

        sqlx::query_as::<_, ScheduleSlot>(&format!(
            r#"
            UPDATE franjas_horarias
            SET hora_inicio = $1, hora_fin = $2, updated_at = NOW()
            WHERE id = $3 AND institucion_id = $4
            RETURNING {COLUMNS}
            "#
        ))
        .bind(hora_inicio)
        .bind(hora_fin)
        .bind(franja_id)
        .bind(institucion_id)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "franjas_horarias"))
    }

    #[instrument(skip(db))]
    pub async fn delete(
        db: &PgPool,
        institucion_id: Uuid,
        franja_id: Uuid,
    ) -> Result<(), AppError> {
        let result =
            sqlx::query("DELETE FROM franjas_horarias WHERE id = $1 AND institucion_id = $2")
                .bind(franja_id)
                .bind(institucion_id)
                .execute(db)
                .await
                .map_err(|e| map_delete_error(e, "Schedule slot"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Schedule slot not found"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_check_time_order() {
        assert!(check_time_order(time(7, 0), time(7, 55)).is_ok());
        assert!(check_time_order(time(7, 55), time(7, 0)).is_err());
        // Zero-length slots are rejected too
        assert!(check_time_order(time(7, 0), time(7, 0)).is_err());
    }
}
