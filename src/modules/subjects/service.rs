use anyhow::Context;
use aula_core::pagination::{ListQuery, Paginated, SortDir};
use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::subjects::model::{CreateSubjectDto, Subject, UpdateSubjectDto};
use crate::utils::errors::{AppError, map_delete_error, map_sqlx_error};

const COLUMNS: &str = "id, nombre, area_id, horas_semanales, created_at, updated_at";
const SORTABLE: &[&str] = &["nombre", "horas_semanales"];

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        query: &ListQuery,
        area_id: Option<Uuid>,
    ) -> Result<Paginated<Subject>, AppError> {
        let pattern = query.search().map(|s| format!("%{s}%"));
        let (sort_col, sort_dir) = query
            .sort(SORTABLE)
            .map_err(|e| AppError::bad_request(anyhow::Error::new(e)))?
            .unwrap_or(("nombre", SortDir::Asc));

        fn push_filters(
            qb: &mut QueryBuilder<'_, sqlx::Postgres>,
            area_id: Option<Uuid>,
            pattern: Option<&str>,
        ) {
            let mut prefix = " WHERE ";
            if let Some(id) = area_id {
                qb.push(prefix).push("area_id = ").push_bind(id);
                prefix = " AND ";
            }
            if let Some(pat) = pattern {
                qb.push(prefix).push("nombre ILIKE ").push_bind(pat.to_string());
            }
        }

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM asignaturas");
        push_filters(&mut count, area_id, pattern.as_deref());
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count subjects")
            .map_err(AppError::database)?;

        let mut rows = QueryBuilder::new(format!("SELECT {COLUMNS} FROM asignaturas"));
        push_filters(&mut rows, area_id, pattern.as_deref());
        rows.push(format!(" ORDER BY {sort_col} {}, id", sort_dir.as_sql()));
        rows.push(" LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let data = rows
            .build_query_as::<Subject>()
            .fetch_all(db)
            .await
            .context("Failed to fetch subjects")
            .map_err(AppError::database)?;

        Ok(Paginated::new(data, total, query.page(), query.per_page()))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Subject, AppError> {
        sqlx::query_as::<_, Subject>(&format!(
            "SELECT {COLUMNS} FROM asignaturas WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch subject")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Subject not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateSubjectDto) -> Result<Subject, AppError> {
        sqlx::query_as::<_, Subject>(&format!(
            r#"
            INSERT INTO asignaturas (nombre, area_id, horas_semanales)
            VALUES ($1, $2, $3)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&dto.nombre)
        .bind(dto.area_id)
        .bind(dto.horas_semanales)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "asignaturas"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError> {
        let existing = Self::get(db, id).await?;

        let nombre = dto.nombre.unwrap_or(existing.nombre);
        let area_id = dto.area_id.unwrap_or(existing.area_id);
        let horas_semanales = dto.horas_semanales.unwrap_or(existing.horas_semanales);

        sqlx::query_as::<_, Subject>(&format!(
            r#"
            UPDATE asignaturas
            SET nombre = $1, area_id = $2, horas_semanales = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&nombre)
        .bind(area_id)
        .bind(horas_semanales)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "asignaturas"))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM asignaturas WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Subject"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Subject not found")));
        }

        Ok(())
    }
}
