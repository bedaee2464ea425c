mod common;

use axum::http::StatusCode;
use common::{
    create_campus, create_grade, create_group, create_institution, create_student, create_year,
    id_of, request_json, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;

struct Fixture {
    sede_id: String,
    grado_id: String,
    anio_id: String,
}

async fn base_fixture(app: &axum::Router) -> Fixture {
    let institucion = create_institution(app).await;
    let sede = create_campus(app, &id_of(&institucion)).await;
    let grado = create_grade(app, 10).await;
    let anio = create_year(app, 2026).await;
    Fixture {
        sede_id: id_of(&sede),
        grado_id: id_of(&grado),
        anio_id: id_of(&anio),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_group_and_detail_occupancy(pool: PgPool) {
    let app = setup_test_app(pool);
    let fx = base_fixture(&app).await;

    let group = create_group(&app, &fx.grado_id, &fx.sede_id, &fx.anio_id, "10A", 4).await;
    let group_id = id_of(&group);

    for _ in 0..2 {
        create_student(&app, Some(&group_id)).await;
    }

    let (status, body) = request_json(&app, "GET", &format!("/api/grupos/{group_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["estudiantes_count"], 2);
    assert_eq!(body["cupo_maximo"], 4);
    assert_eq!(body["ocupacion"], 50.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_group_with_unknown_grade_is_field_error(pool: PgPool) {
    let app = setup_test_app(pool);
    let fx = base_fixture(&app).await;

    let (status, body) = request_json(
        &app,
        "POST",
        "/api/grupos",
        Some(json!({
            "nombre": "10A",
            "grado_id": uuid::Uuid::new_v4(),
            "sede_id": fx.sede_id,
            "anio_id": fx.anio_id,
            "cupo_maximo": 40,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"].as_object().unwrap().contains_key("grado_id"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_transfer_student_between_groups(pool: PgPool) {
    let app = setup_test_app(pool);
    let fx = base_fixture(&app).await;

    let source = create_group(&app, &fx.grado_id, &fx.sede_id, &fx.anio_id, "10A", 40).await;
    let destination = create_group(&app, &fx.grado_id, &fx.sede_id, &fx.anio_id, "10B", 40).await;
    let student = create_student(&app, Some(&id_of(&source))).await;

    let (status, _) = request_json(
        &app,
        "PUT",
        &format!(
            "/api/grupos/{}/estudiantes/{}/trasladar",
            id_of(&source),
            id_of(&student)
        ),
        Some(json!({"grupo_destino_id": id_of(&destination)})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = request_json(
        &app,
        "GET",
        &format!("/api/estudiantes/{}", id_of(&student)),
        None,
    )
    .await;
    assert_eq!(body["grupo_id"], json!(id_of(&destination)));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_transfer_rejects_same_group(pool: PgPool) {
    let app = setup_test_app(pool);
    let fx = base_fixture(&app).await;

    let group = create_group(&app, &fx.grado_id, &fx.sede_id, &fx.anio_id, "10A", 40).await;
    let student = create_student(&app, Some(&id_of(&group))).await;

    let (status, body) = request_json(
        &app,
        "PUT",
        &format!(
            "/api/grupos/{}/estudiantes/{}/trasladar",
            id_of(&group),
            id_of(&student)
        ),
        Some(json!({"grupo_destino_id": id_of(&group)})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]
        .as_object()
        .unwrap()
        .contains_key("grupo_destino_id"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_transfer_rejects_other_academic_year(pool: PgPool) {
    let app = setup_test_app(pool);
    let fx = base_fixture(&app).await;
    let other_year = create_year(&app, 2027).await;

    let source = create_group(&app, &fx.grado_id, &fx.sede_id, &fx.anio_id, "10A", 40).await;
    let destination =
        create_group(&app, &fx.grado_id, &fx.sede_id, &id_of(&other_year), "10A", 40).await;
    let student = create_student(&app, Some(&id_of(&source))).await;

    let (status, _) = request_json(
        &app,
        "PUT",
        &format!(
            "/api/grupos/{}/estudiantes/{}/trasladar",
            id_of(&source),
            id_of(&student)
        ),
        Some(json!({"grupo_destino_id": id_of(&destination)})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_transfer_rejects_full_destination(pool: PgPool) {
    let app = setup_test_app(pool);
    let fx = base_fixture(&app).await;

    let source = create_group(&app, &fx.grado_id, &fx.sede_id, &fx.anio_id, "10A", 40).await;
    let destination = create_group(&app, &fx.grado_id, &fx.sede_id, &fx.anio_id, "10B", 1).await;
    create_student(&app, Some(&id_of(&destination))).await;
    let student = create_student(&app, Some(&id_of(&source))).await;

    let (status, body) = request_json(
        &app,
        "PUT",
        &format!(
            "/api/grupos/{}/estudiantes/{}/trasladar",
            id_of(&source),
            id_of(&student)
        ),
        Some(json!({"grupo_destino_id": id_of(&destination)})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["grupo_destino_id"][0]
        .as_str()
        .unwrap()
        .contains("full"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_transfer_requires_enrollment_in_source(pool: PgPool) {
    let app = setup_test_app(pool);
    let fx = base_fixture(&app).await;

    let source = create_group(&app, &fx.grado_id, &fx.sede_id, &fx.anio_id, "10A", 40).await;
    let destination = create_group(&app, &fx.grado_id, &fx.sede_id, &fx.anio_id, "10B", 40).await;
    // Enrolled nowhere
    let student = create_student(&app, None).await;

    let (status, _) = request_json(
        &app,
        "PUT",
        &format!(
            "/api/grupos/{}/estudiantes/{}/trasladar",
            id_of(&source),
            id_of(&student)
        ),
        Some(json!({"grupo_destino_id": id_of(&destination)})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_group_unassigns_students(pool: PgPool) {
    let app = setup_test_app(pool);
    let fx = base_fixture(&app).await;

    let group = create_group(&app, &fx.grado_id, &fx.sede_id, &fx.anio_id, "10A", 40).await;
    let student = create_student(&app, Some(&id_of(&group))).await;

    let (status, _) =
        request_json(&app, "DELETE", &format!("/api/grupos/{}", id_of(&group)), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = request_json(
        &app,
        "GET",
        &format!("/api/estudiantes/{}", id_of(&student)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["grupo_id"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_groups_filter_by_year(pool: PgPool) {
    let app = setup_test_app(pool);
    let fx = base_fixture(&app).await;
    let other_year = create_year(&app, 2027).await;

    create_group(&app, &fx.grado_id, &fx.sede_id, &fx.anio_id, "10A", 40).await;
    create_group(&app, &fx.grado_id, &fx.sede_id, &id_of(&other_year), "10A", 40).await;

    let (_, body) = request_json(
        &app,
        "GET",
        &format!("/api/grupos?anio_id={}", fx.anio_id),
        None,
    )
    .await;
    assert_eq!(body["total"], 1);
}
