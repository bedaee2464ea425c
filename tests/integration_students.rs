mod common;

use axum::http::StatusCode;
use common::{create_student, id_of, request_json, setup_test_app, unique_digits};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_validation(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = request_json(
        &app,
        "POST",
        "/api/estudiantes",
        Some(json!({
            "nombres": "",
            "apellidos": "García",
            "documento": "123",
            "estado": "matriculado",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = body["errors"].as_object().unwrap();
    assert!(errors.contains_key("nombres"));
    assert!(errors.contains_key("documento"));
    assert!(errors.contains_key("estado"));
    assert!(!errors.contains_key("apellidos"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_documento_is_a_field_error(pool: PgPool) {
    let app = setup_test_app(pool);
    let documento = unique_digits(10);

    let payload = json!({
        "nombres": "Ana",
        "apellidos": "García",
        "documento": documento,
        "estado": "activo",
    });
    let (status, _) = request_json(&app, "POST", "/api/estudiantes", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request_json(&app, "POST", "/api/estudiantes", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"].as_object().unwrap().contains_key("documento"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_pagination_and_search(pool: PgPool) {
    let app = setup_test_app(pool);
    for _ in 0..15 {
        create_student(&app, None).await;
    }
    request_json(
        &app,
        "POST",
        "/api/estudiantes",
        Some(json!({
            "nombres": "Pedro",
            "apellidos": "Zuluaga",
            "documento": unique_digits(10),
            "estado": "activo",
        })),
    )
    .await;

    let (_, body) = request_json(&app, "GET", "/api/estudiantes?page=2&per_page=10", None).await;
    assert_eq!(body["total"], 16);
    assert_eq!(body["current_page"], 2);
    assert_eq!(body["last_page"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 6);

    let (_, body) = request_json(&app, "GET", "/api/estudiantes?search=zuluaga", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["nombres"], "Pedro");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_filter_by_estado(pool: PgPool) {
    let app = setup_test_app(pool);
    create_student(&app, None).await;
    request_json(
        &app,
        "POST",
        "/api/estudiantes",
        Some(json!({
            "nombres": "Laura",
            "apellidos": "Mejía",
            "documento": unique_digits(10),
            "estado": "retirado",
        })),
    )
    .await;

    let (_, body) = request_json(&app, "GET", "/api/estudiantes?estado=retirado", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["estado"], "retirado");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_keeps_unspecified_fields(pool: PgPool) {
    let app = setup_test_app(pool);
    let student = create_student(&app, None).await;
    let id = id_of(&student);

    let (status, body) = request_json(
        &app,
        "PUT",
        &format!("/api/estudiantes/{id}"),
        Some(json!({"estado": "egresado"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["estado"], "egresado");
    assert_eq!(body["nombres"], student["nombres"]);
    assert_eq!(body["documento"], student["documento"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_student_removes_guardians(pool: PgPool) {
    let app = setup_test_app(pool);
    let student = create_student(&app, None).await;
    let student_id = id_of(&student);

    let (status, guardian) = request_json(
        &app,
        "POST",
        "/api/acudientes",
        Some(json!({
            "nombres": "Rosa",
            "apellidos": "García",
            "documento": unique_digits(10),
            "telefono": "3001234567",
            "parentesco": "madre",
            "estudiante_id": student_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) =
        request_json(&app, "DELETE", &format!("/api/estudiantes/{student_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request_json(
        &app,
        "GET",
        &format!("/api/acudientes/{}", id_of(&guardian)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
