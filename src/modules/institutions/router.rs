use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_institution, delete_institution, get_institution, get_institutions,
    update_institution, update_institution_form,
};

pub fn init_institutions_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_institution).get(get_institutions))
        // Named to match the nested franjas-horarias router's segment
        .route(
            "/{institucion_id}",
            get(get_institution)
                .put(update_institution)
                .post(update_institution_form)
                .delete(delete_institution),
        )
        // Crest uploads can exceed axum's default body limit
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
}
