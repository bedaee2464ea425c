use anyhow::Context;
use aula_core::pagination::{ListQuery, Paginated, SortDir};
use chrono::NaiveDate;
use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::academic_years::model::{
    AcademicYear, CreateAcademicYearDto, CreatePeriodDto, Period, UpdateAcademicYearDto,
    UpdatePeriodDto,
};
use crate::utils::errors::{AppError, map_delete_error, map_sqlx_error};

const YEAR_COLUMNS: &str = "id, anio, fecha_inicio, fecha_fin, estado, created_at, updated_at";
const PERIOD_COLUMNS: &str =
    "id, anio_id, nombre, numero, fecha_inicio, fecha_fin, created_at, updated_at";
const SORTABLE: &[&str] = &["anio", "estado", "fecha_inicio"];

/// `fecha_inicio < fecha_fin`, reported against `fecha_fin`.
fn check_date_order(inicio: NaiveDate, fin: NaiveDate) -> Result<(), AppError> {
    if inicio >= fin {
        return Err(AppError::unprocessable_field(
            "fecha_fin",
            "fecha_fin must be after fecha_inicio",
        ));
    }
    Ok(())
}

/// Period dates must sit inside the owning year's range.
fn check_period_within_year(
    year: &AcademicYear,
    inicio: NaiveDate,
    fin: NaiveDate,
) -> Result<(), AppError> {
    if inicio < year.fecha_inicio || fin > year.fecha_fin {
        return Err(AppError::unprocessable_field(
            "fecha_inicio",
            "period dates must fall within the academic year",
        ));
    }
    Ok(())
}

pub struct AcademicYearService;

impl AcademicYearService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        query: &ListQuery,
    ) -> Result<Paginated<AcademicYear>, AppError> {
        let pattern = query.search().map(|s| format!("%{s}%"));
        let (sort_col, sort_dir) = query
            .sort(SORTABLE)
            .map_err(|e| AppError::bad_request(anyhow::Error::new(e)))?
            .unwrap_or(("anio", SortDir::Desc));

        fn push_search(qb: &mut QueryBuilder<'_, sqlx::Postgres>, pattern: Option<&str>) {
            if let Some(pat) = pattern {
                qb.push(" WHERE (estado ILIKE ")
                    .push_bind(pat.to_string())
                    .push(" OR anio::text ILIKE ")
                    .push_bind(pat.to_string())
                    .push(")");
            }
        }

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM anios");
        push_search(&mut count, pattern.as_deref());
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count academic years")
            .map_err(AppError::database)?;

        let mut rows = QueryBuilder::new(format!("SELECT {YEAR_COLUMNS} FROM anios"));
        push_search(&mut rows, pattern.as_deref());
        rows.push(format!(" ORDER BY {sort_col} {}, id", sort_dir.as_sql()));
        rows.push(" LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let data = rows
            .build_query_as::<AcademicYear>()
            .fetch_all(db)
            .await
            .context("Failed to fetch academic years")
            .map_err(AppError::database)?;

        Ok(Paginated::new(data, total, query.page(), query.per_page()))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<AcademicYear, AppError> {
        sqlx::query_as::<_, AcademicYear>(&format!(
            "SELECT {YEAR_COLUMNS} FROM anios WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch academic year")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Academic year not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        dto: CreateAcademicYearDto,
    ) -> Result<AcademicYear, AppError> {
        check_date_order(dto.fecha_inicio, dto.fecha_fin)?;

        sqlx::query_as::<_, AcademicYear>(&format!(
            r#"
            INSERT INTO anios (anio, fecha_inicio, fecha_fin, estado)
            VALUES ($1, $2, $3, $4)
            RETURNING {YEAR_COLUMNS}
            "#
        ))
        .bind(dto.anio)
        .bind(dto.fecha_inicio)
        .bind(dto.fecha_fin)
        .bind(&dto.estado)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "anios"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateAcademicYearDto,
    ) -> Result<AcademicYear, AppError> {
        let existing = Self::get(db, id).await?;

        let anio = dto.anio.unwrap_or(existing.anio);
        let fecha_inicio = dto.fecha_inicio.unwrap_or(existing.fecha_inicio);
        let fecha_fin = dto.fecha_fin.unwrap_or(existing.fecha_fin);
        let estado = dto.estado.unwrap_or(existing.estado);

        check_date_order(fecha_inicio, fecha_fin)?;

        sqlx::query_as::<_, AcademicYear>(&format!(
            r#"
            UPDATE anios
            SET anio = $1, fecha_inicio = $2, fecha_fin = $3, estado = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING {YEAR_COLUMNS}
            "#
        ))
        .bind(anio)
        .bind(fecha_inicio)
        .bind(fecha_fin)
        .bind(&estado)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "anios"))
    }

    /// Periods cascade at the database level.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM anios WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Academic year"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Academic year not found"
            )));
        }

        Ok(())
    }

    /// Bare-array list of a year's periods, ordered by their ordinal.
    #[instrument(skip(db))]
    pub async fn list_periods(db: &PgPool, anio_id: Uuid) -> Result<Vec<Period>, AppError> {
        // 404 on an unknown year rather than an empty list
        Self::get(db, anio_id).await?;

        sqlx::query_as::<_, Period>(&format!(
            "SELECT {PERIOD_COLUMNS} FROM periodos WHERE anio_id = $1 ORDER BY numero"
        ))
        .bind(anio_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch periods")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_period(
        db: &PgPool,
        anio_id: Uuid,
        periodo_id: Uuid,
    ) -> Result<Period, AppError> {
        sqlx::query_as::<_, Period>(&format!(
            "SELECT {PERIOD_COLUMNS} FROM periodos WHERE id = $1 AND anio_id = $2"
        ))
        .bind(periodo_id)
        .bind(anio_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch period")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Period not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create_period(
        db: &PgPool,
        anio_id: Uuid,
        dto: CreatePeriodDto,
    ) -> Result<Period, AppError> {
        let year = Self::get(db, anio_id).await?;
        check_date_order(dto.fecha_inicio, dto.fecha_fin)?;
        check_period_within_year(&year, dto.fecha_inicio, dto.fecha_fin)?;

        sqlx::query_as::<_, Period>(&format!(
            r#"
            INSERT INTO periodos (anio_id, nombre, numero, fecha_inicio, fecha_fin)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PERIOD_COLUMNS}
            "#
        ))
        .bind(anio_id)
        .bind(&dto.nombre)
        .bind(dto.numero)
        .bind(dto.fecha_inicio)
        .bind(dto.fecha_fin)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "periodos"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_period(
        db: &PgPool,
        anio_id: Uuid,
        periodo_id: Uuid,
        dto: UpdatePeriodDto,
    ) -> Result<Period, AppError> {
        let year = Self::get(db, anio_id).await?;
        let existing = Self::get_period(db, anio_id, periodo_id).await?;

        let nombre = dto.nombre.unwrap_or(existing.nombre);
        let numero = dto.numero.unwrap_or(existing.numero);
        let fecha_inicio = dto.fecha_inicio.unwrap_or(existing.fecha_inicio);
        let fecha_fin = dto.fecha_fin.unwrap_or(existing.fecha_fin);

        check_date_order(fecha_inicio, fecha_fin)?;
        check_period_within_year(&year, fecha_inicio, fecha_fin)?;

        sqlx::query_as::<_, Period>(&format!(
            r#"
            UPDATE periodos
            SET nombre = $1, numero = $2, fecha_inicio = $3, fecha_fin = $4, updated_at = NOW()
            WHERE id = $5 AND anio_id = $6
            RETURNING {PERIOD_COLUMNS}
            "#
        ))
        .bind(&nombre)
        .bind(numero)
        .bind(fecha_inicio)
        .bind(fecha_fin)
        .bind(periodo_id)
        .bind(anio_id)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "periodos"))
    }

    #[instrument(skip(db))]
    pub async fn delete_period(
        db: &PgPool,
        anio_id: Uuid,
        periodo_id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM periodos WHERE id = $1 AND anio_id = $2")
            .bind(periodo_id)
            .bind(anio_id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Period"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Period not found")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn year(inicio: NaiveDate, fin: NaiveDate) -> AcademicYear {
        AcademicYear {
            id: Uuid::new_v4(),
            anio: 2026,
            fecha_inicio: inicio,
            fecha_fin: fin,
            estado: "activo".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_check_date_order() {
        assert!(check_date_order(date(2026, 1, 20), date(2026, 11, 28)).is_ok());
        let err = check_date_order(date(2026, 11, 28), date(2026, 1, 20)).unwrap_err();
        assert!(err.field_errors.unwrap().contains_key("fecha_fin"));
    }

    #[test]
    fn test_check_period_within_year() {
        let y = year(date(2026, 1, 20), date(2026, 11, 28));
        assert!(check_period_within_year(&y, date(2026, 1, 20), date(2026, 4, 3)).is_ok());
        assert!(check_period_within_year(&y, date(2026, 1, 1), date(2026, 4, 3)).is_err());
        assert!(check_period_within_year(&y, date(2026, 9, 1), date(2026, 12, 15)).is_err());
    }
}
