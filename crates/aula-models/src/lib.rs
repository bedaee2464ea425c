//! # Aula Models
//!
//! Domain models and DTOs for the Aula API: database entities, create/update
//! request DTOs with their validation rules, and the small response shapes
//! that do not belong to a single controller.
//!
//! Wire-facing field names are Spanish, matching the REST surface the admin
//! frontend consumes (`/instituciones`, `/grupos`, ...); type and module
//! names are English.

pub mod academic_years;
pub mod areas;
pub mod assignments;
pub mod campuses;
pub mod grades;
pub mod groups;
pub mod guardians;
pub mod institutions;
pub mod schedule_slots;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;

pub use academic_years::{AcademicYear, Period};
pub use groups::{Group, GroupDetail};
pub use institutions::Institution;
pub use students::Student;
