use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::academic_years::router::{init_academic_years_router, init_periods_router};
use crate::modules::areas::router::init_areas_router;
use crate::modules::assignments::router::init_assignments_router;
use crate::modules::campuses::router::init_campuses_router;
use crate::modules::grades::router::init_grades_router;
use crate::modules::groups::router::init_groups_router;
use crate::modules::guardians::router::init_guardians_router;
use crate::modules::institutions::router::init_institutions_router;
use crate::modules::schedule_slots::router::init_schedule_slots_router;
use crate::modules::students::router::init_students_router;
use crate::modules::subjects::router::init_subjects_router;
use crate::modules::teachers::router::init_teachers_router;
use crate::modules::users::router::{init_roles_router, init_users_router};
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest_service(
            "/files",
            ServeDir::new(state.storage_config.upload_dir.clone()),
        )
        .nest(
            "/api",
            Router::new()
                .nest(
                    "/instituciones",
                    init_institutions_router().nest(
                        "/{institucion_id}/franjas-horarias",
                        init_schedule_slots_router(),
                    ),
                )
                .nest("/sedes", init_campuses_router())
                .nest(
                    "/anios",
                    init_academic_years_router()
                        .nest("/{anio_id}/periodos", init_periods_router()),
                )
                .nest("/grados", init_grades_router())
                .nest("/grupos", init_groups_router())
                .nest("/areas", init_areas_router())
                .nest("/asignaturas", init_subjects_router())
                .nest("/estudiantes", init_students_router())
                .nest("/docentes", init_teachers_router())
                .nest("/acudientes", init_guardians_router())
                .nest("/users", init_users_router())
                .nest("/roles", init_roles_router())
                .nest("/asignaciones", init_assignments_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
