pub use aula_models::campuses::*;
