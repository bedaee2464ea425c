//! The per-resource registry: endpoint path, search policy, table columns
//! and required form fields, declared once per entity.
//!
//! Records are handled as opaque JSON objects; the columns only name the
//! fields the console renders.

use aula_client::{Align, Column, SearchMode};
use clap::ValueEnum;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Instituciones,
    Sedes,
    Anios,
    Grados,
    Grupos,
    Areas,
    Asignaturas,
    Estudiantes,
    Docentes,
    Acudientes,
    Users,
    Roles,
    Asignaciones,
}

pub struct ResourceSpec {
    pub endpoint: &'static str,
    pub mode: SearchMode,
    /// Required selects checked client-side before submit
    pub required: &'static [&'static str],
    pub empty_message: &'static str,
    pub columns: fn() -> Vec<Column<Value>>,
}

macro_rules! col {
    ($field:literal, $header:literal) => {
        Column::new($field, $header, |v: &Value| match v.get($field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        })
    };
}

fn id_column() -> Column<Value> {
    col!("id", "Id")
}

impl ResourceKind {
    pub fn spec(self) -> ResourceSpec {
        match self {
            ResourceKind::Instituciones => ResourceSpec {
                endpoint: "/instituciones",
                mode: SearchMode::Server,
                required: &["nombre", "codigo_dane"],
                empty_message: "No hay instituciones registradas.",
                columns: || {
                    vec![
                        id_column(),
                        col!("nombre", "Nombre").sortable(),
                        col!("codigo_dane", "Código DANE").sortable(),
                        col!("direccion", "Dirección"),
                        col!("telefono", "Teléfono"),
                    ]
                },
            },
            ResourceKind::Sedes => ResourceSpec {
                endpoint: "/sedes",
                mode: SearchMode::Server,
                required: &["nombre", "institucion_id"],
                empty_message: "No hay sedes registradas.",
                columns: || {
                    vec![
                        id_column(),
                        col!("nombre", "Nombre").sortable(),
                        col!("direccion", "Dirección"),
                        col!("institucion_id", "Institución"),
                    ]
                },
            },
            ResourceKind::Anios => ResourceSpec {
                endpoint: "/anios",
                mode: SearchMode::Server,
                required: &["anio", "fecha_inicio", "fecha_fin", "estado"],
                empty_message: "No hay años lectivos registrados.",
                columns: || {
                    vec![
                        id_column(),
                        col!("anio", "Año").sortable().right_aligned(),
                        col!("fecha_inicio", "Inicio"),
                        col!("fecha_fin", "Fin"),
                        col!("estado", "Estado").sortable(),
                    ]
                },
            },
            ResourceKind::Grados => ResourceSpec {
                endpoint: "/grados",
                mode: SearchMode::Server,
                required: &["nombre", "ordinal"],
                empty_message: "No hay grados registrados.",
                columns: || {
                    vec![
                        id_column(),
                        col!("nombre", "Nombre").sortable(),
                        col!("ordinal", "Ordinal").sortable().right_aligned(),
                    ]
                },
            },
            ResourceKind::Grupos => ResourceSpec {
                endpoint: "/grupos",
                mode: SearchMode::Server,
                required: &["nombre", "grado_id", "sede_id", "anio_id", "cupo_maximo"],
                empty_message: "No hay grupos registrados.",
                columns: || {
                    vec![
                        id_column(),
                        col!("nombre", "Nombre").sortable(),
                        col!("cupo_maximo", "Cupo").sortable().right_aligned(),
                        col!("grado_id", "Grado"),
                        col!("sede_id", "Sede"),
                    ]
                },
            },
            ResourceKind::Areas => ResourceSpec {
                endpoint: "/areas",
                mode: SearchMode::Server,
                required: &["nombre"],
                empty_message: "No hay áreas registradas.",
                columns: || vec![id_column(), col!("nombre", "Nombre").sortable()],
            },
            ResourceKind::Asignaturas => ResourceSpec {
                endpoint: "/asignaturas",
                mode: SearchMode::Server,
                required: &["nombre", "area_id", "horas_semanales"],
                empty_message: "No hay asignaturas registradas.",
                columns: || {
                    vec![
                        id_column(),
                        col!("nombre", "Nombre").sortable(),
                        col!("horas_semanales", "Horas").sortable().right_aligned(),
                        col!("area_id", "Área"),
                    ]
                },
            },
            ResourceKind::Estudiantes => ResourceSpec {
                endpoint: "/estudiantes",
                mode: SearchMode::Server,
                required: &["nombres", "apellidos", "documento", "estado"],
                empty_message: "No hay estudiantes registrados.",
                columns: || {
                    vec![
                        id_column(),
                        col!("apellidos", "Apellidos").sortable(),
                        col!("nombres", "Nombres").sortable(),
                        col!("documento", "Documento").sortable(),
                        col!("estado", "Estado").sortable(),
                        col!("grupo_id", "Grupo"),
                    ]
                },
            },
            ResourceKind::Docentes => ResourceSpec {
                endpoint: "/docentes",
                mode: SearchMode::Server,
                required: &["nombres", "apellidos", "documento", "correo"],
                empty_message: "No hay docentes registrados.",
                columns: || {
                    vec![
                        id_column(),
                        col!("apellidos", "Apellidos").sortable(),
                        col!("nombres", "Nombres").sortable(),
                        col!("documento", "Documento").sortable(),
                        col!("especialidad", "Especialidad"),
                    ]
                },
            },
            ResourceKind::Acudientes => ResourceSpec {
                endpoint: "/acudientes",
                mode: SearchMode::Server,
                required: &["nombres", "apellidos", "documento", "telefono", "parentesco", "estudiante_id"],
                empty_message: "No hay acudientes registrados.",
                columns: || {
                    vec![
                        id_column(),
                        col!("apellidos", "Apellidos").sortable(),
                        col!("nombres", "Nombres").sortable(),
                        col!("telefono", "Teléfono"),
                        col!("parentesco", "Parentesco"),
                        col!("estudiante_id", "Estudiante"),
                    ]
                },
            },
            ResourceKind::Users => ResourceSpec {
                endpoint: "/users",
                mode: SearchMode::Server,
                required: &["nombre", "correo", "rol_id"],
                empty_message: "No hay usuarios registrados.",
                columns: || {
                    vec![
                        id_column(),
                        col!("nombre", "Nombre").sortable(),
                        col!("correo", "Correo").sortable(),
                        col!("rol_id", "Rol"),
                    ]
                },
            },
            // The role catalog comes back as a bare array and filters locally
            ResourceKind::Roles => ResourceSpec {
                endpoint: "/roles",
                mode: SearchMode::Client {
                    fields: &["nombre", "descripcion"],
                },
                required: &[],
                empty_message: "No hay roles definidos.",
                columns: || {
                    vec![
                        id_column(),
                        col!("nombre", "Nombre").sortable(),
                        col!("descripcion", "Descripción"),
                    ]
                },
            },
            ResourceKind::Asignaciones => ResourceSpec {
                endpoint: "/asignaciones",
                mode: SearchMode::Server,
                required: &["grupo_id", "asignatura_id", "docente_id", "franja_id", "dia_semana"],
                empty_message: "No hay asignaciones registradas.",
                columns: || {
                    vec![
                        id_column(),
                        col!("dia_semana", "Día").sortable().right_aligned(),
                        col!("grupo_id", "Grupo"),
                        col!("asignatura_id", "Asignatura"),
                        col!("docente_id", "Docente"),
                        col!("franja_id", "Franja"),
                    ]
                },
            },
        }
    }

    /// Label used in confirmation messages.
    pub fn singular(self) -> &'static str {
        match self {
            ResourceKind::Instituciones => "institución",
            ResourceKind::Sedes => "sede",
            ResourceKind::Anios => "año lectivo",
            ResourceKind::Grados => "grado",
            ResourceKind::Grupos => "grupo",
            ResourceKind::Areas => "área",
            ResourceKind::Asignaturas => "asignatura",
            ResourceKind::Estudiantes => "estudiante",
            ResourceKind::Docentes => "docente",
            ResourceKind::Acudientes => "acudiente",
            ResourceKind::Users => "usuario",
            ResourceKind::Roles => "rol",
            ResourceKind::Asignaciones => "asignación",
        }
    }
}
