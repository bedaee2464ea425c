mod common;

use axum::http::StatusCode;
use common::{
    create_campus, create_grade, create_group, create_institution, create_year, id_of,
    request_json, setup_test_app, unique_digits,
};
use serde_json::{Value, json};
use sqlx::PgPool;

async fn create_slot(app: &axum::Router, institucion_id: &str, inicio: &str, fin: &str) -> Value {
    let (status, body) = request_json(
        app,
        "POST",
        &format!("/api/instituciones/{institucion_id}/franjas-horarias"),
        Some(json!({"hora_inicio": inicio, "hora_fin": fin})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "slot fixture: {body}");
    body
}

async fn create_teacher(app: &axum::Router) -> Value {
    let (status, body) = request_json(
        app,
        "POST",
        "/api/docentes",
        Some(json!({
            "nombres": "Carlos",
            "apellidos": "Restrepo",
            "documento": unique_digits(10),
            "correo": format!("docente-{}@esperanza.edu.co", unique_digits(6)),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "teacher fixture: {body}");
    body
}

async fn create_subject(app: &axum::Router) -> Value {
    let (status, area) = request_json(
        app,
        "POST",
        "/api/areas",
        Some(json!({"nombre": format!("Área {}", unique_digits(6))})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = request_json(
        app,
        "POST",
        "/api/asignaturas",
        Some(json!({
            "nombre": format!("Asignatura {}", unique_digits(6)),
            "area_id": id_of(&area),
            "horas_semanales": 4,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "subject fixture: {body}");
    body
}

#[sqlx::test(migrations = "./migrations")]
async fn test_slot_carries_derived_duration(pool: PgPool) {
    let app = setup_test_app(pool);
    let institucion = create_institution(&app).await;

    let slot = create_slot(&app, &id_of(&institucion), "07:00:00", "07:55:00").await;
    assert_eq!(slot["duracion_minutos"], 55);

    let (_, listed) = request_json(
        &app,
        "GET",
        &format!("/api/instituciones/{}/franjas-horarias", id_of(&institucion)),
        None,
    )
    .await;
    // Bare array ordered by start time
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["duracion_minutos"], 55);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_slot_rejects_inverted_times(pool: PgPool) {
    let app = setup_test_app(pool);
    let institucion = create_institution(&app).await;

    let (status, body) = request_json(
        &app,
        "POST",
        &format!("/api/instituciones/{}/franjas-horarias", id_of(&institucion)),
        Some(json!({"hora_inicio": "08:00:00", "hora_fin": "07:00:00"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"].as_object().unwrap().contains_key("hora_fin"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assignment_double_booking_rules(pool: PgPool) {
    let app = setup_test_app(pool);

    let institucion = create_institution(&app).await;
    let sede = create_campus(&app, &id_of(&institucion)).await;
    let grado = create_grade(&app, 10).await;
    let anio = create_year(&app, 2026).await;
    let group_a = create_group(&app, &id_of(&grado), &id_of(&sede), &id_of(&anio), "10A", 40).await;
    let group_b = create_group(&app, &id_of(&grado), &id_of(&sede), &id_of(&anio), "10B", 40).await;
    let slot = create_slot(&app, &id_of(&institucion), "07:00:00", "07:55:00").await;
    let teacher = create_teacher(&app).await;
    let other_teacher = create_teacher(&app).await;
    let subject = create_subject(&app).await;

    let assignment = json!({
        "grupo_id": id_of(&group_a),
        "asignatura_id": id_of(&subject),
        "docente_id": id_of(&teacher),
        "franja_id": id_of(&slot),
        "dia_semana": 1,
    });
    let (status, _) =
        request_json(&app, "POST", "/api/asignaciones", Some(assignment.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    // Same group, same slot, same day: rejected even with another teacher
    let mut group_clash = assignment.clone();
    group_clash["docente_id"] = json!(id_of(&other_teacher));
    let (status, body) = request_json(&app, "POST", "/api/asignaciones", Some(group_clash)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"].as_object().unwrap().contains_key("franja_id"));

    // Same teacher, same slot, same day, another group: rejected
    let mut teacher_clash = assignment.clone();
    teacher_clash["grupo_id"] = json!(id_of(&group_b));
    let (status, body) = request_json(&app, "POST", "/api/asignaciones", Some(teacher_clash)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"].as_object().unwrap().contains_key("docente_id"));

    // A different day is fine
    let mut other_day = assignment.clone();
    other_day["dia_semana"] = json!(2);
    let (status, _) = request_json(&app, "POST", "/api/asignaciones", Some(other_day)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assignment_rejects_weekday_out_of_range(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = request_json(
        &app,
        "POST",
        "/api/asignaciones",
        Some(json!({
            "grupo_id": uuid::Uuid::new_v4(),
            "asignatura_id": uuid::Uuid::new_v4(),
            "docente_id": uuid::Uuid::new_v4(),
            "franja_id": uuid::Uuid::new_v4(),
            "dia_semana": 9,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"].as_object().unwrap().contains_key("dia_semana"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_referenced_slot_is_a_conflict(pool: PgPool) {
    let app = setup_test_app(pool);

    let institucion = create_institution(&app).await;
    let sede = create_campus(&app, &id_of(&institucion)).await;
    let grado = create_grade(&app, 10).await;
    let anio = create_year(&app, 2026).await;
    let group = create_group(&app, &id_of(&grado), &id_of(&sede), &id_of(&anio), "10A", 40).await;
    let slot = create_slot(&app, &id_of(&institucion), "07:00:00", "07:55:00").await;
    let teacher = create_teacher(&app).await;
    let subject = create_subject(&app).await;

    let (status, _) = request_json(
        &app,
        "POST",
        "/api/asignaciones",
        Some(json!({
            "grupo_id": id_of(&group),
            "asignatura_id": id_of(&subject),
            "docente_id": id_of(&teacher),
            "franja_id": id_of(&slot),
            "dia_semana": 1,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request_json(
        &app,
        "DELETE",
        &format!(
            "/api/instituciones/{}/franjas-horarias/{}",
            id_of(&institucion),
            id_of(&slot)
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("referenced"));
}
