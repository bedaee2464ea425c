use axum::{Router, routing::{get, post}};

use crate::state::AppState;

use super::controller::{
    create_period, create_year, delete_period, delete_year, get_period, get_periods, get_year,
    get_years, update_period, update_year,
};

pub fn init_academic_years_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_year).get(get_years))
        // Named to match the nested periodos router's segment
        .route(
            "/{anio_id}",
            get(get_year).put(update_year).delete(delete_year),
        )
}

/// Nested under `/anios/{anio_id}`. The period list is a bare array: a year
/// has at most a handful of periods and the console filters them locally.
pub fn init_periods_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_period).get(get_periods))
        .route(
            "/{periodo_id}",
            get(get_period).put(update_period).delete(delete_period),
        )
}
