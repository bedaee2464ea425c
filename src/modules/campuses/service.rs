use anyhow::Context;
use aula_core::pagination::{ListQuery, Paginated, SortDir};
use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::campuses::model::{Campus, CreateCampusDto, UpdateCampusDto};
use crate::utils::errors::{AppError, map_delete_error, map_sqlx_error};

const COLUMNS: &str = "id, nombre, direccion, institucion_id, created_at, updated_at";
const SORTABLE: &[&str] = &["nombre"];

pub struct CampusService;

impl CampusService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        query: &ListQuery,
        institucion_id: Option<Uuid>,
    ) -> Result<Paginated<Campus>, AppError> {
        let pattern = query.search().map(|s| format!("%{s}%"));
        let (sort_col, sort_dir) = query
            .sort(SORTABLE)
            .map_err(|e| AppError::bad_request(anyhow::Error::new(e)))?
            .unwrap_or(("nombre", SortDir::Asc));

        fn push_filters(
            qb: &mut QueryBuilder<'_, sqlx::Postgres>,
            institucion_id: Option<Uuid>,
            pattern: Option<&str>,
        ) {
            let mut prefix = " WHERE ";
            if let Some(id) = institucion_id {
                qb.push(prefix).push("institucion_id = ").push_bind(id);
                prefix = " AND ";
            }
            if let Some(pat) = pattern {
                qb.push(prefix)
                    .push("(nombre ILIKE ")
                    .push_bind(pat.to_string())
                    .push(" OR direccion ILIKE ")
                    .push_bind(pat.to_string())
                    .push(")");
            }
        }

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM sedes");
        push_filters(&mut count, institucion_id, pattern.as_deref());
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count campuses")
            .map_err(AppError::database)?;

        let mut rows = QueryBuilder::new(format!("SELECT {COLUMNS} FROM sedes"));
        push_filters(&mut rows, institucion_id, pattern.as_deref());
        rows.push(format!(" ORDER BY {sort_col} {}, id", sort_dir.as_sql()));
        rows.push(" LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let data = rows
            .build_query_as::<Campus>()
            .fetch_all(db)
            .await
            .context("Failed to fetch campuses")
            .map_err(AppError::database)?;

        Ok(Paginated::new(data, total, query.page(), query.per_page()))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Campus, AppError> {
        sqlx::query_as::<_, Campus>(&format!("SELECT {COLUMNS} FROM sedes WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch campus")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Campus not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateCampusDto) -> Result<Campus, AppError> {
        sqlx::query_as::<_, Campus>(&format!(
            r#"
            INSERT INTO sedes (nombre, direccion, institucion_id)
            VALUES ($1, $2, $3)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&dto.nombre)
        .bind(&dto.direccion)
        .bind(dto.institucion_id)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "sedes"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCampusDto,
    ) -> Result<Campus, AppError> {
        let existing = Self::get(db, id).await?;

        let nombre = dto.nombre.unwrap_or(existing.nombre);
        let direccion = dto.direccion.or(existing.direccion);
        let institucion_id = dto.institucion_id.unwrap_or(existing.institucion_id);

        sqlx::query_as::<_, Campus>(&format!(
            r#"
            UPDATE sedes
            SET nombre = $1, direccion = $2, institucion_id = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&nombre)
        .bind(&direccion)
        .bind(institucion_id)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "sedes"))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sedes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Campus"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Campus not found")));
        }

        Ok(())
    }
}
