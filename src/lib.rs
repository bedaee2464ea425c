//! # Aula API
//!
//! REST backend for a school-administration platform built with Rust, Axum
//! and PostgreSQL. It exposes conventional list/create/read/update/delete
//! endpoints for every record type the admin console manages (institutions,
//! campuses, academic years and their periods, grades, groups, areas,
//! subjects, students, teachers, guardians, users/roles, schedule slots and
//! teaching assignments), plus the student-transfer operation between groups.
//!
//! ## Architecture
//!
//! The codebase follows a modular layout:
//!
//! ```text
//! src/
//! ├── config/           # Configuration modules (database)
//! ├── modules/          # Feature modules, one per resource
//! │   ├── institutions/
//! │   ├── campuses/
//! │   ├── academic_years/   # years + nested periods
//! │   ├── grades/
//! │   ├── groups/           # includes the transfer operation
//! │   ├── areas/
//! │   ├── subjects/
//! │   ├── students/
//! │   ├── teachers/
//! │   ├── guardians/
//! │   ├── users/            # users + read-only role catalog
//! │   ├── schedule_slots/   # nested under institutions
//! │   └── assignments/
//! └── utils/            # Shared utilities (errors)
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers (routes)
//! - `service.rs`: Business logic and SQL
//! - `model.rs`: Re-exports from `aula-models`
//! - `router.rs`: Axum router configuration
//!
//! ## List contract
//!
//! Every collection endpoint accepts `page`, `per_page`, `search`, `sort_by`
//! and `sort_dir` and answers with the envelope
//! `{data, total, per_page, current_page, last_page}`. Two small catalogs,
//! roles and the periods of a year, return bare arrays instead. Validation
//! failures answer `422` with `{errors: {field: [message, ...]}}`; every
//! other error answers `{message}`.
//!
//! ## API Documentation
//!
//! When the server is running, interactive documentation is available at:
//!
//! - Swagger UI: `http://localhost:8000/swagger-ui`
//! - Scalar: `http://localhost:8000/scalar`

pub mod config;
pub mod docs;
pub mod logging;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

// Re-export workspace crates for convenience
pub use aula_config;
pub use aula_core;
pub use aula_db;
pub use aula_models;
