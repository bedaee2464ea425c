mod common;

use axum::http::StatusCode;
use common::{create_institution, id_of, request_json, setup_test_app, unique_digits};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_institution(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = request_json(
        &app,
        "POST",
        "/api/instituciones",
        Some(json!({
            "nombre": "IE La Esperanza",
            "codigo_dane": "105001000123",
            "direccion": "Cra 45 # 12-30",
            "correo": "rectoria@esperanza.edu.co",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["nombre"], "IE La Esperanza");
    assert_eq!(body["codigo_dane"], "105001000123");
    assert!(body["id"].is_string());
    assert!(body["escudo_url"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_institution_validation_errors_are_field_keyed(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = request_json(
        &app,
        "POST",
        "/api/instituciones",
        Some(json!({
            "nombre": "",
            "codigo_dane": "123",
            "correo": "not-an-email",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = body["errors"].as_object().unwrap();
    assert!(errors.contains_key("nombre"));
    assert!(errors.contains_key("codigo_dane"));
    assert!(errors.contains_key("correo"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_codigo_dane_maps_to_field_error(pool: PgPool) {
    let app = setup_test_app(pool);

    let payload = json!({"nombre": "IE Central", "codigo_dane": "105001000999"});
    let (status, _) = request_json(&app, "POST", "/api/instituciones", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request_json(&app, "POST", "/api/instituciones", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["codigo_dane"][0]
        .as_str()
        .unwrap()
        .contains("already in use"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_returns_paginated_envelope(pool: PgPool) {
    let app = setup_test_app(pool);
    for _ in 0..12 {
        create_institution(&app).await;
    }

    let (status, body) =
        request_json(&app, "GET", "/api/instituciones?page=2&per_page=5", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 12);
    assert_eq!(body["per_page"], 5);
    assert_eq!(body["current_page"], 2);
    assert_eq!(body["last_page"], 3);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_page_beyond_last_is_empty_with_real_totals(pool: PgPool) {
    let app = setup_test_app(pool);
    for _ in 0..3 {
        create_institution(&app).await;
    }

    let (status, body) =
        request_json(&app, "GET", "/api/instituciones?page=7&per_page=10", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_page"], 7);
    assert_eq!(body["total"], 3);
    assert_eq!(body["last_page"], 1);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_filters_by_name_and_code(pool: PgPool) {
    let app = setup_test_app(pool);
    request_json(
        &app,
        "POST",
        "/api/instituciones",
        Some(json!({"nombre": "IE La Esperanza", "codigo_dane": "105001000123"})),
    )
    .await;
    request_json(
        &app,
        "POST",
        "/api/instituciones",
        Some(json!({"nombre": "IE El Progreso", "codigo_dane": "205001000456"})),
    )
    .await;

    let (_, body) = request_json(&app, "GET", "/api/instituciones?search=esperanza", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["nombre"], "IE La Esperanza");

    let (_, body) = request_json(&app, "GET", "/api/instituciones?search=2050010", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["nombre"], "IE El Progreso");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sort_by_unknown_column_is_rejected(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) =
        request_json(&app, "GET", "/api/instituciones?sort_by=escudo_url", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("escudo_url"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sort_directions(pool: PgPool) {
    let app = setup_test_app(pool);
    for nombre in ["B Institución", "A Institución", "C Institución"] {
        request_json(
            &app,
            "POST",
            "/api/instituciones",
            Some(json!({"nombre": nombre, "codigo_dane": unique_digits(10)})),
        )
        .await;
    }

    let (_, body) = request_json(
        &app,
        "GET",
        "/api/instituciones?sort_by=nombre&sort_dir=desc",
        None,
    )
    .await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["nombre"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["C Institución", "B Institución", "A Institución"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_update_delete_cycle(pool: PgPool) {
    let app = setup_test_app(pool);
    let institution = create_institution(&app).await;
    let id = id_of(&institution);

    let (status, body) =
        request_json(&app, "GET", &format!("/api/instituciones/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(id));

    let (status, body) = request_json(
        &app,
        "PUT",
        &format!("/api/instituciones/{id}"),
        Some(json!({"telefono": "6040000000"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["telefono"], "6040000000");

    let (status, _) =
        request_json(&app, "DELETE", &format!("/api/instituciones/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request_json(&app, "GET", &format!("/api/instituciones/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_institution_is_404_with_message(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = request_json(
        &app,
        "GET",
        &format!("/api/instituciones/{}", uuid::Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Institution not found");
}
