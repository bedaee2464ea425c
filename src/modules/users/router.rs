use axum::{Router, routing::{get, post}};

use crate::state::AppState;

use super::controller::{
    create_user, delete_user, get_roles, get_user, get_users, update_user,
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user).get(get_users))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

/// The role catalog is read-only; it is seeded by migration.
pub fn init_roles_router() -> Router<AppState> {
    Router::new().route("/", get(get_roles))
}
