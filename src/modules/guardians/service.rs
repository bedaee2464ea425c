use anyhow::Context;
use aula_core::pagination::{ListQuery, Paginated, SortDir};
use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::guardians::model::{CreateGuardianDto, Guardian, UpdateGuardianDto};
use crate::utils::errors::{AppError, map_delete_error, map_sqlx_error};

const COLUMNS: &str = "id, nombres, apellidos, documento, telefono, correo, parentesco, \
                       estudiante_id, created_at, updated_at";
const SORTABLE: &[&str] = &["apellidos", "nombres", "documento"];

pub struct GuardianService;

impl GuardianService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        query: &ListQuery,
        estudiante_id: Option<Uuid>,
    ) -> Result<Paginated<Guardian>, AppError> {
        let pattern = query.search().map(|s| format!("%{s}%"));
        let (sort_col, sort_dir) = query
            .sort(SORTABLE)
            .map_err(|e| AppError::bad_request(anyhow::Error::new(e)))?
            .unwrap_or(("apellidos", SortDir::Asc));

        fn push_filters(
            qb: &mut QueryBuilder<'_, sqlx::Postgres>,
            estudiante_id: Option<Uuid>,
            pattern: Option<&str>,
        ) {
            let mut prefix = " WHERE ";
            if let Some(id) = estudiante_id {
                qb.push(prefix).push("estudiante_id = ").push_bind(id);
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

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM acudientes");
        push_filters(&mut count, estudiante_id, pattern.as_deref());
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count guardians")
            .map_err(AppError::database)?;

        let mut rows = QueryBuilder::new(format!("SELECT {COLUMNS} FROM acudientes"));
        push_filters(&mut rows, estudiante_id, pattern.as_deref());
        rows.push(format!(" ORDER BY {sort_col} {}, id", sort_dir.as_sql()));
        rows.push(" LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let data = rows
            .build_query_as::<Guardian>()
            .fetch_all(db)
            .await
            .context("Failed to fetch guardians")
            .map_err(AppError::database)?;

        Ok(Paginated::new(data, total, query.page(), query.per_page()))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Guardian, AppError> {
        sqlx::query_as::<_, Guardian>(&format!(
            "SELECT {COLUMNS} FROM acudientes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch guardian")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Guardian not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateGuardianDto) -> Result<Guardian, AppError> {
        sqlx::query_as::<_, Guardian>(&format!(
            r#"
            INSERT INTO acudientes
                (nombres, apellidos, documento, telefono, correo, parentesco, estudiante_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&dto.nombres)
        .bind(&dto.apellidos)
        .bind(&dto.documento)
        .bind(&dto.telefono)
        .bind(&dto.correo)
        .bind(&dto.parentesco)
        .bind(dto.estudiante_id)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "acudientes"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateGuardianDto,
    ) -> Result<Guardian, AppError> {
        let existing = Self::get(db, id).await?;

        let nombres = dto.nombres.unwrap_or(existing.nombres);
        let apellidos = dto.apellidos.unwrap_or(existing.apellidos);
        let documento = dto.documento.unwrap_or(existing.documento);
        let telefono = dto.telefono.unwrap_or(existing.telefono);
        let correo = dto.correo.or(existing.correo);
        let parentesco = dto.parentesco.unwrap_or(existing.parentesco);
        let estudiante_id = dto.estudiante_id.unwrap_or(existing.estudiante_id);

        sqlx::query_as::<_, Guardian>(&format!(
            r#"
            UPDATE acudientes
            SET nombres = $1, apellidos = $2, documento = $3, telefono = $4,
                correo = $5, parentesco = $6, estudiante_id = $7, updated_at = NOW()
            WHERE id = $8
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&nombres)
        .bind(&apellidos)
        .bind(&documento)
        .bind(&telefono)
        .bind(&correo)
        .bind(&parentesco)
        .bind(estudiante_id)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "acudientes"))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM acudientes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Guardian"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Guardian not found")));
        }

        Ok(())
    }
}
