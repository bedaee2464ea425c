use anyhow::Context;
use aula_core::pagination::{ListQuery, Paginated, SortDir};
use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::{CreateUserDto, Role, UpdateUserDto, User};
use crate::utils::errors::{AppError, map_delete_error, map_sqlx_error};

const COLUMNS: &str = "id, nombre, correo, rol_id, created_at, updated_at";
const SORTABLE: &[&str] = &["nombre", "correo"];

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, query: &ListQuery) -> Result<Paginated<User>, AppError> {
        let pattern = query.search().map(|s| format!("%{s}%"));
        let (sort_col, sort_dir) = query
            .sort(SORTABLE)
            .map_err(|e| AppError::bad_request(anyhow::Error::new(e)))?
            .unwrap_or(("nombre", SortDir::Asc));

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM users");
        if let Some(pat) = &pattern {
            count
                .push(" WHERE (nombre ILIKE ")
                .push_bind(pat)
                .push(" OR correo ILIKE ")
                .push_bind(pat)
                .push(")");
        }
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count users")
            .map_err(AppError::database)?;

        let mut rows = QueryBuilder::new(format!("SELECT {COLUMNS} FROM users"));
        if let Some(pat) = &pattern {
            rows.push(" WHERE (nombre ILIKE ")
                .push_bind(pat)
                .push(" OR correo ILIKE ")
                .push_bind(pat)
                .push(")");
        }
        rows.push(format!(" ORDER BY {sort_col} {}, id", sort_dir.as_sql()));
        rows.push(" LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let data = rows
            .build_query_as::<User>()
            .fetch_all(db)
            .await
            .context("Failed to fetch users")
            .map_err(AppError::database)?;

        Ok(Paginated::new(data, total, query.page(), query.per_page()))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch user")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (nombre, correo, rol_id) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(&dto.nombre)
        .bind(&dto.correo)
        .bind(dto.rol_id)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "users"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: Uuid, dto: UpdateUserDto) -> Result<User, AppError> {
        let existing = Self::get(db, id).await?;

        let nombre = dto.nombre.unwrap_or(existing.nombre);
        let correo = dto.correo.unwrap_or(existing.correo);
        let rol_id = dto.rol_id.unwrap_or(existing.rol_id);

        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET nombre = $1, correo = $2, rol_id = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&nombre)
        .bind(&correo)
        .bind(rol_id)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "users"))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "User"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        Ok(())
    }

    /// The role catalog, as a bare array.
    #[instrument(skip(db))]
    pub async fn list_roles(db: &PgPool) -> Result<Vec<Role>, AppError> {
        sqlx::query_as::<_, Role>("SELECT id, nombre, descripcion FROM roles ORDER BY nombre")
            .fetch_all(db)
            .await
            .context("Failed to fetch roles")
            .map_err(AppError::database)
    }
}
