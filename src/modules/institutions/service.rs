use anyhow::Context;
use aula_core::pagination::{ListQuery, Paginated, SortDir};
use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::institutions::model::{
    CreateInstitutionDto, Institution, UpdateInstitutionDto,
};
use crate::utils::errors::{AppError, map_delete_error, map_sqlx_error};

const COLUMNS: &str =
    "id, nombre, codigo_dane, direccion, telefono, correo, escudo_url, created_at, updated_at";
const SORTABLE: &[&str] = &["nombre", "codigo_dane"];

pub struct InstitutionService;

impl InstitutionService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        query: &ListQuery,
    ) -> Result<Paginated<Institution>, AppError> {
        let pattern = query.search().map(|s| format!("%{s}%"));
        let (sort_col, sort_dir) = query
            .sort(SORTABLE)
            .map_err(|e| AppError::bad_request(anyhow::Error::new(e)))?
            .unwrap_or(("nombre", SortDir::Asc));

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM instituciones");
        if let Some(pat) = &pattern {
            count
                .push(" WHERE (nombre ILIKE ")
                .push_bind(pat)
                .push(" OR codigo_dane ILIKE ")
                .push_bind(pat)
                .push(")");
        }
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count institutions")
            .map_err(AppError::database)?;

        let mut rows = QueryBuilder::new(format!("SELECT {COLUMNS} FROM instituciones"));
        if let Some(pat) = &pattern {
            rows.push(" WHERE (nombre ILIKE ")
                .push_bind(pat)
                .push(" OR codigo_dane ILIKE ")
                .push_bind(pat)
                .push(")");
        }
        rows.push(format!(" ORDER BY {sort_col} {}, id", sort_dir.as_sql()));
        rows.push(" LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let data = rows
            .build_query_as::<Institution>()
            .fetch_all(db)
            .await
            .context("Failed to fetch institutions")
            .map_err(AppError::database)?;

        Ok(Paginated::new(data, total, query.page(), query.per_page()))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Institution, AppError> {
        sqlx::query_as::<_, Institution>(&format!(
            "SELECT {COLUMNS} FROM instituciones WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch institution")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Institution not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        dto: CreateInstitutionDto,
        escudo_url: Option<String>,
    ) -> Result<Institution, AppError> {
        sqlx::query_as::<_, Institution>(&format!(
            r#"
            INSERT INTO instituciones (nombre, codigo_dane, direccion, telefono, correo, escudo_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&dto.nombre)
        .bind(&dto.codigo_dane)
        .bind(&dto.direccion)
        .bind(&dto.telefono)
        .bind(&dto.correo)
        .bind(&escudo_url)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "instituciones"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateInstitutionDto,
        escudo_url: Option<String>,
    ) -> Result<Institution, AppError> {
        let existing = Self::get(db, id).await?;

        let nombre = dto.nombre.unwrap_or(existing.nombre);
        let codigo_dane = dto.codigo_dane.unwrap_or(existing.codigo_dane);
        let direccion = dto.direccion.or(existing.direccion);
        let telefono = dto.telefono.or(existing.telefono);
        let correo = dto.correo.or(existing.correo);
        let escudo_url = escudo_url.or(existing.escudo_url);

        sqlx::query_as::<_, Institution>(&format!(
            r#"
            UPDATE instituciones
            SET nombre = $1, codigo_dane = $2, direccion = $3, telefono = $4,
                correo = $5, escudo_url = $6, updated_at = NOW()
            WHERE id = $7
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&nombre)
        .bind(&codigo_dane)
        .bind(&direccion)
        .bind(&telefono)
        .bind(&correo)
        .bind(&escudo_url)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "instituciones"))
    }

    /// Campuses and schedule slots cascade at the database level.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM instituciones WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Institution"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Institution not found")));
        }

        Ok(())
    }
}
