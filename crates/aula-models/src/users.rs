//! Administrative user and role models.
//!
//! Roles are a fixed catalog seeded by migration; the API only lists them.
//! Session handling and permission enforcement live outside this system.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub nombre: String,
    pub correo: String,
    pub rol_id: Uuid,
    #[sqlx(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[sqlx(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Role {
    pub id: Uuid,
    pub nombre: String,
    pub descripcion: Option<String>,
}

/// Well-known role ids (must match the seed migration).
pub mod system_roles {
    use uuid::Uuid;
    pub const ADMIN: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000001);
    pub const RECTOR: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000002);
    pub const COORDINADOR: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000003);
    pub const SECRETARIA: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000004);
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 120))]
    pub nombre: String,
    #[validate(email)]
    pub correo: String,
    pub rol_id: Uuid,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 120))]
    pub nombre: Option<String>,
    #[validate(email)]
    pub correo: Option<String>,
    pub rol_id: Option<Uuid>,
}
