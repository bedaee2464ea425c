use anyhow::Context;
use aula_core::pagination::{ListQuery, Paginated, SortDir};
use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::assignments::model::{
    Assignment, CreateAssignmentDto, UpdateAssignmentDto,
};
use crate::utils::errors::{AppError, map_delete_error, map_sqlx_error};

const COLUMNS: &str = "id, grupo_id, asignatura_id, docente_id, franja_id, dia_semana, \
                       created_at, updated_at";
const SORTABLE: &[&str] = &["dia_semana"];

/// The two double-booking constraints are enforced by unique indexes; their
/// violations surface as 422s against the colliding reference.
fn map_overlap_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some("asignaciones_grupo_franja_dia_key") => AppError::unprocessable_field(
                    "franja_id",
                    "the group already has an assignment in this slot",
                ),
                Some("asignaciones_docente_franja_dia_key") => AppError::unprocessable_field(
                    "docente_id",
                    "the teacher is already assigned in this slot",
                ),
                _ => map_sqlx_error(err, "asignaciones"),
            };
        }
    }
    map_sqlx_error(err, "asignaciones")
}

pub struct AssignmentService;

impl AssignmentService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        query: &ListQuery,
        grupo_id: Option<Uuid>,
        docente_id: Option<Uuid>,
    ) -> Result<Paginated<Assignment>, AppError> {
        let (sort_col, sort_dir) = query
            .sort(SORTABLE)
            .map_err(|e| AppError::bad_request(anyhow::Error::new(e)))?
            .unwrap_or(("dia_semana", SortDir::Asc));

        fn push_filters(
            qb: &mut QueryBuilder<'_, sqlx::Postgres>,
            grupo_id: Option<Uuid>,
            docente_id: Option<Uuid>,
        ) {
            let mut prefix = " WHERE ";
            if let Some(id) = grupo_id {
                qb.push(prefix).push("grupo_id = ").push_bind(id);
                prefix = " AND ";
            }
            if let Some(id) = docente_id {
                qb.push(prefix).push("docente_id = ").push_bind(id);
            }
        }

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM asignaciones");
        push_filters(&mut count, grupo_id, docente_id);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count assignments")
            .map_err(AppError::database)?;

        let mut rows = QueryBuilder::new(format!("SELECT {COLUMNS} FROM asignaciones"));
        push_filters(&mut rows, grupo_id, docente_id);
        rows.push(format!(" ORDER BY {sort_col} {}, id", sort_dir.as_sql()));
        rows.push(" LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let data = rows
            .build_query_as::<Assignment>()
            .fetch_all(db)
            .await
            .context("Failed to fetch assignments")
            .map_err(AppError::database)?;

        Ok(Paginated::new(data, total, query.page(), query.per_page()))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Assignment, AppError> {
        sqlx::query_as::<_, Assignment>(&format!(
            "SELECT {COLUMNS} FROM asignaciones WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch assignment")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Assignment not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateAssignmentDto) -> Result<Assignment, AppError> {
        sqlx::query_as::<_, Assignment>(&format!(
            r#"
            INSERT INTO asignaciones (grupo_id, asignatura_id, docente_id, franja_id, dia_semana)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(dto.grupo_id)
        .bind(dto.asignatura_id)
        .bind(dto.docente_id)
        .bind(dto.franja_id)
        .bind(dto.dia_semana)
        .fetch_one(db)
        .await
        .map_err(map_overlap_error)
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateAssignmentDto,
    ) -> Result<Assignment, AppError> {
        let existing = Self::get(db, id).await?;

        let grupo_id = dto.grupo_id.unwrap_or(existing.grupo_id);
        let asignatura_id = dto.asignatura_id.unwrap_or(existing.asignatura_id);
        let docente_id = dto.docente_id.unwrap_or(existing.docente_id);
        let franja_id = dto.franja_id.unwrap_or(existing.franja_id);
        let dia_semana = dto.dia_semana.unwrap_or(existing.dia_semana);

        sqlx::query_as::<_, Assignment>(&format!(
            r#"
            UPDATE asignaciones
            SET grupo_id = $1, asignatura_id = $2, docente_id = $3, franja_id = $4,
                dia_semana = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING {COLUMNS}
            "#
        ))
        .bind(grupo_id)
        .bind(asignatura_id)
        .bind(docente_id)
        .bind(franja_id)
        .bind(dia_semana)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(map_overlap_error)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM asignaciones WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Assignment"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Assignment not found")));
        }

        Ok(())
    }
}
