use anyhow::Context;
use aula_core::pagination::{ListQuery, Paginated, SortDir};
use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::groups::model::{
    CreateGroupDto, Group, GroupDetail, UpdateGroupDto,
};
use crate::utils::errors::{AppError, map_delete_error, map_sqlx_error};

const COLUMNS: &str =
    "id, nombre, grado_id, sede_id, anio_id, cupo_maximo, created_at, updated_at";
const SORTABLE: &[&str] = &["nombre", "cupo_maximo"];

pub struct GroupService;

impl GroupService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        query: &ListQuery,
        anio_id: Option<Uuid>,
        grado_id: Option<Uuid>,
        sede_id: Option<Uuid>,
    ) -> Result<Paginated<Group>, AppError> {
        let pattern = query.search().map(|s| format!("%{s}%"));
        let (sort_col, sort_dir) = query
            .sort(SORTABLE)
            .map_err(|e| AppError::bad_request(anyhow::Error::new(e)))?
            .unwrap_or(("nombre", SortDir::Asc));

        fn push_filters(
            qb: &mut QueryBuilder<'_, sqlx::Postgres>,
            anio_id: Option<Uuid>,
            grado_id: Option<Uuid>,
            sede_id: Option<Uuid>,
            pattern: Option<&str>,
        ) {
            let mut prefix = " WHERE ";
            for (column, value) in [
                ("anio_id = ", anio_id),
                ("grado_id = ", grado_id),
                ("sede_id = ", sede_id),
            ] {
                if let Some(id) = value {
                    qb.push(prefix).push(column).push_bind(id);
                    prefix = " AND ";
                }
            }
            if let Some(pat) = pattern {
                qb.push(prefix).push("nombre ILIKE ").push_bind(pat.to_string());
            }
        }

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM grupos");
        push_filters(&mut count, anio_id, grado_id, sede_id, pattern.as_deref());
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count groups")
            .map_err(AppError::database)?;

        let mut rows = QueryBuilder::new(format!("SELECT {COLUMNS} FROM grupos"));
        push_filters(&mut rows, anio_id, grado_id, sede_id, pattern.as_deref());
        rows.push(format!(" ORDER BY {sort_col} {}, id", sort_dir.as_sql()));
        rows.push(" LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let data = rows
            .build_query_as::<Group>()
            .fetch_all(db)
            .await
            .context("Failed to fetch groups")
            .map_err(AppError::database)?;

        Ok(Paginated::new(data, total, query.page(), query.per_page()))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Group, AppError> {
        sqlx::query_as::<_, Group>(&format!("SELECT {COLUMNS} FROM grupos WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch group")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Group not found")))
    }

    /// Detail-page shape: the group plus enrollment count and occupancy.
    #[instrument(skip(db))]
    pub async fn get_detail(db: &PgPool, id: Uuid) -> Result<GroupDetail, AppError> {
        let group = Self::get(db, id).await?;

        let estudiantes_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM estudiantes WHERE grupo_id = $1",
        )
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to count group students")
        .map_err(AppError::database)?;

        Ok(GroupDetail {
            ocupacion: GroupDetail::occupancy_pct(estudiantes_count, group.cupo_maximo),
            id: group.id,
            nombre: group.nombre,
            grado_id: group.grado_id,
            sede_id: group.sede_id,
            anio_id: group.anio_id,
            cupo_maximo: group.cupo_maximo,
            estudiantes_count,
        })
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateGroupDto) -> Result<Group, AppError> {
        sqlx::query_as::<_, Group>(&format!(
            r#"
            INSERT INTO grupos (nombre, grado_id, sede_id, anio_id, cupo_maximo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&dto.nombre)
        .bind(dto.grado_id)
        .bind(dto.sede_id)
        .bind(dto.anio_id)
        .bind(dto.cupo_maximo)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "grupos"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: Uuid, dto: UpdateGroupDto) -> Result<Group, AppError> {
        let existing = Self::get(db, id).await?;

        let nombre = dto.nombre.unwrap_or(existing.nombre);
        let grado_id = dto.grado_id.unwrap_or(existing.grado_id);
        let sede_id = dto.sede_id.unwrap_or(existing.sede_id);
        let anio_id = dto.anio_id.unwrap_or(existing.anio_id);
        let cupo_maximo = dto.cupo_maximo.unwrap_or(existing.cupo_maximo);

        sqlx::query_as::<_, Group>(&format!(
            r#"
            UPDATE grupos
            SET nombre = $1, grado_id = $2, sede_id = $3, anio_id = $4,
                cupo_maximo = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&nombre)
        .bind(grado_id)
        .bind(sede_id)
        .bind(anio_id)
        .bind(cupo_maximo)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_sqlx_error(e, "grupos"))
    }

    /// Enrolled students are kept and unassigned (`grupo_id` set null by the
    /// database), matching how the console expects group removal to behave.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM grupos WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Group"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Group not found")));
        }

        Ok(())
    }

    /// Move a student enrolled in `grupo_id` to `grupo_destino_id`.
    ///
    /// The destination must be a different group of the same academic year
    /// and must have a seat left.
    #[instrument(skip(db))]
    pub async fn transfer_student(
        db: &PgPool,
        grupo_id: Uuid,
        estudiante_id: Uuid,
        grupo_destino_id: Uuid,
    ) -> Result<(), AppError> {
        let source = Self::get(db, grupo_id).await?;

        if grupo_destino_id == grupo_id {
            return Err(AppError::unprocessable_field(
                "grupo_destino_id",
                "destination group must differ from the source group",
            ));
        }

        let destination = match Self::get(db, grupo_destino_id).await {
            Ok(group) => group,
            Err(e) if e.status == axum::http::StatusCode::NOT_FOUND => {
                return Err(AppError::not_found(anyhow::anyhow!(
                    "Destination group not found"
                )));
            }
            Err(e) => return Err(e),
        };

        if destination.anio_id != source.anio_id {
            return Err(AppError::unprocessable_field(
                "grupo_destino_id",
                "destination group belongs to a different academic year",
            ));
        }

        let enrolled: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM estudiantes WHERE grupo_id = $1")
                .bind(grupo_destino_id)
                .fetch_one(db)
                .await
                .context("Failed to count destination students")
                .map_err(AppError::database)?;

        if enrolled >= destination.cupo_maximo as i64 {
            return Err(AppError::unprocessable_field(
                "grupo_destino_id",
                "destination group is full",
            ));
        }

        let result = sqlx::query(
            "UPDATE estudiantes SET grupo_id = $1, updated_at = NOW() \
             WHERE id = $2 AND grupo_id = $3",
        )
        .bind(grupo_destino_id)
        .bind(estudiante_id)
        .bind(grupo_id)
        .execute(db)
        .await
        .context("Failed to transfer student")
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Student is not enrolled in the source group"
            )));
        }

        Ok(())
    }
}
