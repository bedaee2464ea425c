use anyhow::Context;
use aula_core::pagination::{ListQuery, Paginated, SortDir};
use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::model::{CreateStudentDto, Student, UpdateStudentDto};
use crate::utils::errors::{AppError, map_delete_error, map_sqlx_error};

const COLUMNS: &str = "id, nombres, apellidos, documento, fecha_nacimiento, correo, \
                       grupo_id, estado, created_at, updated_at";
const SORTABLE: &[&str] = &["apellidos", "nombres", "documento", "estado"];

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        query: &ListQuery,
        grupo_id: Option<Uuid>,
        estado: Option<&str>,
    ) -> Result<Paginated<Student>, AppError> {
        let pattern = query.search().map(|s| format!("%{s}%"));
        let (sort_col, sort_dir) = query
            .sort(SORTABLE)
            .map_err(|e| AppError::bad_request(anyhow::Error::new(e)))?
            .unwrap_or(("apellidos", SortDir::Asc));

        fn push_filters(
            qb: &mut QueryBuilder<'_, sqlx::Postgres>,
            grupo_id: Option<Uuid>,
            estado: Option<&str>,
            pattern: Option<&str>,
        ) {
            let mut prefix = " WHERE ";
            if let Some(id) = grupo_id {
                qb.push(prefix).push("grupo_id = ").push_bind(id);
                prefix = " AND ";
            }
            if let Some(estado) = estado {
                qb.push(prefix).push("estado = ").push_bind(estado.to_string());
                prefix = " AND ";
            }
            if let Some(pat) = pattern {
                qb.push(prefix)
                    .push("(nombres ILIKE ")
                    .push_bind(pat.to_string())
                    .push(" OR apellidos ILIKE ")
                    .push_bind(pat.to_string())
                    .push(" OR documento ILIKE ")
                    .push_bind(pat.to_string())
                    .push(")");
            }
        }

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM estudiantes");
        push_filters(&mut count, grupo_id, estado, pattern.as_deref());
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count students")
            .map_err(AppError::database)?;

        let mut rows = QueryBuilder::new(format!("SELECT {COLUMNS} FROM estudiantes"));
        push_filters(&mut rows, grupo_id, estado, pattern.as_deref());
        rows.push(format!(
            " ORDER BY {sort_col} {}, nombres ASC, id",
            sort_dir.as_sql()
        ));
        rows.push(" LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let data = rows
            .build_query_as::<Student>()
            .fetch_all(db)
            .await
            .context("Failed to fetch students")
            .map_err(AppError::database)?;

        Ok(Paginated::new(data, total, query.page(), query.per_page()))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {COLUMNS} FROM estudiantes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch student")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            r#"
            INSERT INTO estudiantes
                (nombres, apellidos, documento, fecha_nacimiento, correo, grupo_id, estado)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&dto.nombres)
        .bind(&dto.apellidos)
        .bind(&dto.documento)
        .bind(dto.fecha_nacimiento)
        .bind(&dto.correo)
        .bind(dto.grupo_id)
        .bind(&dto.estado)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "estudiantes"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get(db, id).await?;

        let nombres = dto.nombres.unwrap_or(existing.nombres);
        let apellidos = dto.apellidos.unwrap_or(existing.apellidos);
        let documento = dto.documento.unwrap_or(existing.documento);
        let fecha_nacimiento = dto.fecha_nacimiento.or(existing.fecha_nacimiento);
        let correo = dto.correo.or(existing.correo);
        let grupo_id = dto.grupo_id.or(existing.grupo_id);
        let estado = dto.estado.unwrap_or(existing.estado);

        sqlx::query_as::<_, Student>(&format!(
            r#"
            UPDATE estudiantes
            SET nombres = $1, apellidos = $2, documento = $3, fecha_nacimiento = $4,
                correo = $5, grupo_id = $6, estado = $7, updated_at = NOW()
            WHERE id = $8
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&nombres)
        .bind(&apellidos)
        .bind(&documento)
        .bind(fecha_nacimiento)
        .bind(&correo)
        .bind(grupo_id)
        .bind(&estado)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "estudiantes"))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM estudiantes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Student"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }
}
