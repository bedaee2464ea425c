use anyhow::Context;
use aula_core::pagination::{ListQuery, Paginated, SortDir};
use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::areas::model::{Area, CreateAreaDto, UpdateAreaDto};
use crate::utils::errors::{AppError, map_delete_error, map_sqlx_error};

const COLUMNS: &str = "id, nombre, created_at, updated_at";
const SORTABLE: &[&str] = &["nombre"];

pub struct AreaService;

impl AreaService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, query: &ListQuery) -> Result<Paginated<Area>, AppError> {
        let pattern = query.search().map(|s| format!("%{s}%"));
        let (sort_col, sort_dir) = query
            .sort(SORTABLE)
            .map_err(|e| AppError::bad_request(anyhow::Error::new(e)))?
            .unwrap_or(("nombre", SortDir::Asc));

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM areas");
        if let Some(pat) = &pattern {
            count.push(" WHERE nombre ILIKE ").push_bind(pat);
        }
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count areas")
            .map_err(AppError::database)?;

        let mut rows = QueryBuilder::new(format!("SELECT {COLUMNS} FROM areas"));
        if let Some(pat) = &pattern {
            rows.push(" WHERE nombre ILIKE ").push_bind(pat);
        }
        rows.push(format!(" ORDER BY {sort_col} {}, id", sort_dir.as_sql()));
        rows.push(" LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let data = rows
            .build_query_as::<Area>()
            .fetch_all(db)
            .await
            .context("Failed to fetch areas")
            .map_err(AppError::database)?;

        Ok(Paginated::new(data, total, query.page(), query.per_page()))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Area, AppError> {
        sqlx::query_as::<_, Area>(&format!("SELECT {COLUMNS} FROM areas WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch area")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Area not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateAreaDto) -> Result<Area, AppError> {
        sqlx::query_as::<_, Area>(&format!(
            "INSERT INTO areas (nombre) VALUES ($1) RETURNING {COLUMNS}"
        ))
        .bind(&dto.nombre)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "areas"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: Uuid, dto: UpdateAreaDto) -> Result<Area, AppError> {
        let existing = Self::get(db, id).await?;
        let nombre = dto.nombre.unwrap_or(existing.nombre);

        sqlx::query_as::<_, Area>(&format!(
            "UPDATE areas SET nombre = $1, updated_at = NOW() WHERE id = $2 RETURNING {COLUMNS}"
        ))
        .bind(&nombre)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "areas"))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM areas WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Area"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Area not found")));
        }

        Ok(())
    }
}
