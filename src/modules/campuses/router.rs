use axum::{Router, routing::{get, post}};

use crate::state::AppState;

use super::controller::{
    create_campus, delete_campus, get_campus, get_campuses, update_campus,
};

pub fn init_campuses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_campus).get(get_campuses))
        .route(
            "/{id}",
            get(get_campus).put(update_campus).delete(delete_campus),
        )
}
