use std::sync::Arc;

use aula::router::init_router;
use aula::state::AppState;
use aula_config::{CorsConfig, HttpConfig, StorageConfig};
use aula_core::storage::LocalFileStore;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;

pub fn setup_test_app(pool: PgPool) -> Router {
    let upload_dir =
        std::env::temp_dir().join(format!("aula-test-uploads-{}", uuid::Uuid::new_v4()));
    let state = AppState {
        db: pool,
        http_config: HttpConfig {
            bind_addr: "127.0.0.1:0".to_string(),
        },
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        storage_config: StorageConfig {
            upload_dir: upload_dir.clone(),
            public_base_url: "http://localhost:8000/files".to_string(),
        },
        files: Arc::new(LocalFileStore::new(
            upload_dir,
            "http://localhost:8000/files".to_string(),
        )),
    };
    init_router(state)
}

/// Issue one JSON request and decode the response. 204s come back as null.
pub async fn request_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            builder
                .body(Body::from(serde_json::to_string(&value).unwrap()))
                .unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[allow(dead_code)]
pub async fn create_institution(app: &Router) -> Value {
    let (status, body) = request_json(
        app,
        "POST",
        "/api/instituciones",
        Some(json!({
            "nombre": format!("IE {}", uuid::Uuid::new_v4()),
            "codigo_dane": unique_digits(10),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "institution fixture: {body}");
    body
}

#[allow(dead_code)]
pub async fn create_campus(app: &Router, institucion_id: &str) -> Value {
    let (status, body) = request_json(
        app,
        "POST",
        "/api/sedes",
        Some(json!({
            "nombre": format!("Sede {}", uuid::Uuid::new_v4()),
            "institucion_id": institucion_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "campus fixture: {body}");
    body
}

#[allow(dead_code)]
pub async fn create_year(app: &Router, anio: i32) -> Value {
    let (status, body) = request_json(
        app,
        "POST",
        "/api/anios",
        Some(json!({
            "anio": anio,
            "fecha_inicio": format!("{anio}-01-19"),
            "fecha_fin": format!("{anio}-11-27"),
            "estado": "activo",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "year fixture: {body}");
    body
}

#[allow(dead_code)]
pub async fn create_grade(app: &Router, ordinal: i32) -> Value {
    let (status, body) = request_json(
        app,
        "POST",
        "/api/grados",
        Some(json!({
            "nombre": format!("Grado {}", uuid::Uuid::new_v4()),
            "ordinal": ordinal,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "grade fixture: {body}");
    body
}

#[allow(dead_code)]
pub async fn create_group(
    app: &Router,
    grado_id: &str,
    sede_id: &str,
    anio_id: &str,
    nombre: &str,
    cupo_maximo: i32,
) -> Value {
    let (status, body) = request_json(
        app,
        "POST",
        "/api/grupos",
        Some(json!({
            "nombre": nombre,
            "grado_id": grado_id,
            "sede_id": sede_id,
            "anio_id": anio_id,
            "cupo_maximo": cupo_maximo,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "group fixture: {body}");
    body
}

#[allow(dead_code)]
pub async fn create_student(app: &Router, grupo_id: Option<&str>) -> Value {
    let (status, body) = request_json(
        app,
        "POST",
        "/api/estudiantes",
        Some(json!({
            "nombres": "Ana María",
            "apellidos": format!("García {}", unique_digits(4)),
            "documento": unique_digits(10),
            "grupo_id": grupo_id,
            "estado": "activo",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "student fixture: {body}");
    body
}

/// A pseudo-unique digit string derived from a fresh UUID.
#[allow(dead_code)]
pub fn unique_digits(len: usize) -> String {
    uuid::Uuid::new_v4()
        .as_u128()
        .to_string()
        .chars()
        .take(len)
        .collect()
}

#[allow(dead_code)]
pub fn id_of(record: &Value) -> String {
    record["id"].as_str().unwrap().to_string()
}
