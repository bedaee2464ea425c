//! API-backed data seeder: builds a small but complete school through the
//! public endpoints, so seeded data passes the same validation real clients
//! face.

use std::sync::Arc;

use anyhow::Context;
use aula_client::{ReqwestTransport, ResourceClient, Transport};
use fake::Fake;
use fake::faker::address::en::StreetName;
use fake::faker::name::en::{FirstName, LastName};
use serde_json::{Value, json};

pub struct SeedConfig {
    pub grados: usize,
    pub grupos_por_grado: usize,
    pub estudiantes_por_grupo: usize,
    pub docentes: usize,
}

const AREAS: [&str; 5] = [
    "Matemáticas",
    "Humanidades",
    "Ciencias Naturales",
    "Ciencias Sociales",
    "Educación Física",
];

struct Seeder {
    transport: Arc<dyn Transport>,
    documento_counter: u64,
}

impl Seeder {
    fn client(&self, endpoint: &str) -> ResourceClient {
        ResourceClient::new(self.transport.clone(), endpoint)
    }

    fn next_documento(&mut self) -> String {
        self.documento_counter += 1;
        format!("10{:08}", self.documento_counter)
    }

    async fn create(&self, endpoint: &str, body: Value) -> anyhow::Result<Value> {
        self.client(endpoint)
            .create::<Value>(body)
            .await
            .with_context(|| format!("seeding {endpoint}"))
    }
}

fn id_of(record: &Value) -> String {
    record["id"].as_str().unwrap_or_default().to_string()
}

pub async fn run(base_url: &str, config: SeedConfig) -> anyhow::Result<()> {
    let mut seeder = Seeder {
        transport: Arc::new(ReqwestTransport::new(base_url.to_string())),
        documento_counter: 0,
    };

    println!("Seeding against {base_url} ...");

    let institucion = seeder
        .create(
            "/instituciones",
            json!({
                "nombre": "IE La Esperanza",
                "codigo_dane": "105001000123",
                "direccion": "Cra 45 # 12-30",
                "telefono": "6045551234",
                "correo": "contacto@esperanza.edu.co"
            }),
        )
        .await?;
    let institucion_id = id_of(&institucion);
    println!("  institución {institucion_id}");

    let mut sede_ids = Vec::new();
    for nombre in ["Sede Principal", "Sede Norte"] {
        let street: String = StreetName().fake();
        let sede = seeder
            .create(
                "/sedes",
                json!({
                    "nombre": nombre,
                    "direccion": format!("Calle {street}"),
                    "institucion_id": institucion_id
                }),
            )
            .await?;
        sede_ids.push(id_of(&sede));
    }
    println!("  {} sedes", sede_ids.len());

    let anio = seeder
        .create(
            "/anios",
            json!({
                "anio": 2026,
                "fecha_inicio": "2026-01-19",
                "fecha_fin": "2026-11-27",
                "estado": "activo"
            }),
        )
        .await?;
    let anio_id = id_of(&anio);

    let period_bounds = [
        ("Primer periodo", 1, "2026-01-19", "2026-04-03"),
        ("Segundo periodo", 2, "2026-04-06", "2026-06-12"),
        ("Tercer periodo", 3, "2026-07-06", "2026-09-11"),
        ("Cuarto periodo", 4, "2026-09-14", "2026-11-27"),
    ];
    for (nombre, numero, inicio, fin) in period_bounds {
        seeder
            .create(
                &format!("/anios/{anio_id}/periodos"),
                json!({
                    "nombre": nombre,
                    "numero": numero,
                    "fecha_inicio": inicio,
                    "fecha_fin": fin
                }),
            )
            .await?;
    }
    println!("  año 2026 con {} periodos", period_bounds.len());

    let mut area_ids = Vec::new();
    for nombre in AREAS {
        let area = seeder.create("/areas", json!({ "nombre": nombre })).await?;
        area_ids.push(id_of(&area));
    }
    for (i, area_id) in area_ids.iter().enumerate() {
        seeder
            .create(
                "/asignaturas",
                json!({
                    "nombre": format!("{} I", AREAS[i]),
                    "area_id": area_id,
                    "horas_semanales": 3 + (i as i64 % 3)
                }),
            )
            .await?;
    }
    println!("  {} áreas con asignaturas", area_ids.len());

    for i in 0..config.docentes {
        let nombres: String = FirstName().fake();
        let apellidos: String = LastName().fake();
        let documento = seeder.next_documento();
        seeder
            .create(
                "/docentes",
                json!({
                    "nombres": nombres,
                    "apellidos": apellidos,
                    "documento": documento,
                    "correo": format!("docente{i}@esperanza.edu.co"),
                    "especialidad": AREAS[i % AREAS.len()]
                }),
            )
            .await?;
    }
    println!("  {} docentes", config.docentes);

    let mut grupo_ids = Vec::new();
    for g in 0..config.grados {
        let grado = seeder
            .create(
                "/grados",
                json!({ "nombre": format!("Grado {}", g + 6), "ordinal": (g + 6) as i64 }),
            )
            .await?;
        let grado_id = id_of(&grado);

        for s in 0..config.grupos_por_grado {
            let letra = (b'A' + (s % 26) as u8) as char;
            let grupo = seeder
                .create(
                    "/grupos",
                    json!({
                        "nombre": format!("{}{letra}", g + 6),
                        "grado_id": grado_id,
                        "sede_id": sede_ids[s % sede_ids.len()],
                        "anio_id": anio_id,
                        "cupo_maximo": 40
                    }),
                )
                .await?;
            grupo_ids.push(id_of(&grupo));
        }
    }
    println!("  {} grados, {} grupos", config.grados, grupo_ids.len());

    let mut estudiantes = 0usize;
    for grupo_id in &grupo_ids {
        for _ in 0..config.estudiantes_por_grupo {
            let nombres: String = FirstName().fake();
            let apellidos: String = LastName().fake();
            let documento = seeder.next_documento();
            let estudiante = seeder
                .create(
                    "/estudiantes",
                    json!({
                        "nombres": nombres,
                        "apellidos": apellidos.clone(),
                        "documento": documento,
                        "grupo_id": grupo_id,
                        "estado": "activo"
                    }),
                )
                .await?;
            estudiantes += 1;

            // One guardian per student keeps the acudientes listing useful
            let acudiente_nombres: String = FirstName().fake();
            let telefono = format!("300{:07}", seeder.documento_counter);
            let documento = seeder.next_documento();
            seeder
                .create(
                    "/acudientes",
                    json!({
                        "nombres": acudiente_nombres,
                        "apellidos": apellidos,
                        "documento": documento,
                        "telefono": telefono,
                        "parentesco": "madre",
                        "estudiante_id": id_of(&estudiante)
                    }),
                )
                .await?;
        }
    }
    println!("  {estudiantes} estudiantes con acudiente");

    let slot_bounds = [
        ("07:00:00", "07:55:00"),
        ("08:00:00", "08:55:00"),
        ("09:00:00", "09:55:00"),
        ("10:10:00", "11:05:00"),
    ];
    for (inicio, fin) in slot_bounds {
        seeder
            .create(
                &format!("/instituciones/{institucion_id}/franjas-horarias"),
                json!({ "hora_inicio": inicio, "hora_fin": fin }),
            )
            .await?;
    }
    println!("  {} franjas horarias", slot_bounds.len());

    println!("Done.");
    Ok(())
}
