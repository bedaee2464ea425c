use axum::{Router, routing::{get, post}};

use crate::state::AppState;

use super::controller::{create_area, delete_area, get_area, get_areas, update_area};

pub fn init_areas_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_area).get(get_areas))
        .route("/{id}", get(get_area).put(update_area).delete(delete_area))
}
