use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{
    create_group, delete_group, get_group, get_groups, transfer_student, update_group,
};

pub fn init_groups_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_group).get(get_groups))
        .route("/{id}", get(get_group).put(update_group).delete(delete_group))
        .route(
            "/{id}/estudiantes/{estudiante_id}/trasladar",
            put(transfer_student),
        )
}
