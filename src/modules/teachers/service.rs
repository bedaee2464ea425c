use anyhow::Context;
use aula_core::pagination::{ListQuery, Paginated, SortDir};
use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::teachers::model::{CreateTeacherDto, Teacher, UpdateTeacherDto};
use crate::utils::errors::{AppError, map_delete_error, map_sqlx_error};

const COLUMNS: &str =
    "id, nombres, apellidos, documento, correo, especialidad, created_at, updated_at";
const SORTABLE: &[&str] = &["apellidos", "nombres", "documento"];

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, query: &ListQuery) -> Result<Paginated<Teacher>, AppError> {
        let pattern = query.search().map(|s| format!("%{s}%"));
        let (sort_col, sort_dir) = query
            .sort(SORTABLE)
            .map_err(|e| AppError::bad_request(anyhow::Error::new(e)))?
            .unwrap_or(("apellidos", SortDir::Asc));

        fn push_search(qb: &mut QueryBuilder<'_, sqlx::Postgres>, pattern: Option<&str>) {
            if let Some(pat) = pattern {
                qb.push(" WHERE (nombres ILIKE ")
                    .push_bind(pat.to_string())
                    .push(" OR apellidos ILIKE ")
                    .push_bind(pat.to_string())
                    .push(" OR documento ILIKE ")
                    .push_bind(pat.to_string())
                    .push(" OR especialidad ILIKE ")
                    .push_bind(pat.to_string())
                    .push(")");
            }
        }

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM docentes");
        push_search(&mut count, pattern.as_deref());
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count teachers")
            .map_err(AppError::database)?;

        let mut rows = QueryBuilder::new(format!("SELECT {COLUMNS} FROM docentes"));
        push_search(&mut rows, pattern.as_deref());
        rows.push(format!(" ORDER BY {sort_col} {}, id", sort_dir.as_sql()));
        rows.push(" LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let data = rows
            .build_query_as::<Teacher>()
            .fetch_all(db)
            .await
            .context("Failed to fetch teachers")
            .map_err(AppError::database)?;

        Ok(Paginated::new(data, total, query.page(), query.per_page()))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Teacher, AppError> {
        sqlx::query_as::<_, Teacher>(&format!("SELECT {COLUMNS} FROM docentes WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch teacher")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateTeacherDto) -> Result<Teacher, AppError> {
        sqlx::query_as::<_, Teacher>(&format!(
            r#"
            INSERT INTO docentes (nombres, apellidos, documento, correo, especialidad)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&dto.nombres)
        .bind(&dto.apellidos)
        .bind(&dto.documento)
        .bind(&dto.correo)
        .bind(&dto.especialidad)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "docentes"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateTeacherDto,
    ) -> Result<Teacher, AppError> {
        let existing = Self::get(db, id).await?;

        let nombres = dto.nombres.unwrap_or(existing.nombres);
        let apellidos = dto.apellidos.unwrap_or(existing.apellidos);
        let documento = dto.documento.unwrap_or(existing.documento);
        let correo = dto.correo.unwrap_or(existing.correo);
        let especialidad = dto.especialidad.or(existing.especialidad);

        sqlx::query_as::<_, Teacher>(&format!(
            r#"
            UPDATE docentes
            SET nombres = $1, apellidos = $2, documento = $3, correo = $4,
                especialidad = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&nombres)
        .bind(&apellidos)
        .bind(&documento)
        .bind(&correo)
        .bind(&especialidad)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "docentes"))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM docentes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Teacher"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Teacher not found")));
        }

        Ok(())
    }
}
