use axum::{Router, routing::{get, post}};

use crate::state::AppState;

use super::controller::{create_slot, delete_slot, get_slot, get_slots, update_slot};

/// Nested under `/instituciones/{institucion_id}/franjas-horarias`.
pub fn init_schedule_slots_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_slot).get(get_slots))
        .route("/{franja_id}", get(get_slot).put(update_slot).delete(delete_slot))
}
