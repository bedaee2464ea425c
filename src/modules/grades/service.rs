use anyhow::Context;
use aula_core::pagination::{ListQuery, Paginated, SortDir};
use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::grades::model::{CreateGradeDto, Grade, UpdateGradeDto};
use crate::utils::errors::{AppError, map_delete_error, map_sqlx_error};

const COLUMNS: &str = "id, nombre, ordinal, created_at, updated_at";
const SORTABLE: &[&str] = &["nombre", "ordinal"];

pub struct GradeService;

impl GradeService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, query: &ListQuery) -> Result<Paginated<Grade>, AppError> {
        let pattern = query.search().map(|s| format!("%{s}%"));
        let (sort_col, sort_dir) = query
            .sort(SORTABLE)
            .map_err(|e| AppError::bad_request(anyhow::Error::new(e)))?
            .unwrap_or(("ordinal", SortDir::Asc));

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM grados");
        if let Some(pat) = &pattern {
            count.push(" WHERE nombre ILIKE ").push_bind(pat);
        }
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count grades")
            .map_err(AppError::database)?;

        let mut rows = QueryBuilder::new(format!("SELECT {COLUMNS} FROM grados"));
        if let Some(pat) = &pattern {
            rows.push(" WHERE nombre ILIKE ").push_bind(pat);
        }
        rows.push(format!(" ORDER BY {sort_col} {}, id", sort_dir.as_sql()));
        rows.push(" LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let data = rows
            .build_query_as::<Grade>()
            .fetch_all(db)
            .await
            .context("Failed to fetch grades")
            .map_err(AppError::database)?;

        Ok(Paginated::new(data, total, query.page(), query.per_page()))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Grade, AppError> {
        sqlx::query_as::<_, Grade>(&format!("SELECT {COLUMNS} FROM grados WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch grade")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Grade not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateGradeDto) -> Result<Grade, AppError> {
        sqlx::query_as::<_, Grade>(&format!(
            "INSERT INTO grados (nombre, ordinal) VALUES ($1, $2) RETURNING {COLUMNS}"
        ))
        .bind(&dto.nombre)
        .bind(dto.ordinal)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "grados"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: Uuid, dto: UpdateGradeDto) -> Result<Grade, AppError> {
        let existing = Self::get(db, id).await?;

        let nombre = dto.nombre.unwrap_or(existing.nombre);
        let ordinal = dto.ordinal.unwrap_or(existing.ordinal);

        sqlx::query_as::<_, Grade>(&format!(
            r#"
            UPDATE grados SET nombre = $1, ordinal = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&nombre)
        .bind(ordinal)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "grados"))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM grados WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Grade"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Grade not found")));
        }

        Ok(())
    }
}
