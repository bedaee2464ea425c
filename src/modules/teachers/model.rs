pub use aula_models::teachers::*;
