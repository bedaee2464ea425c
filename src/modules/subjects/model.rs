pub use aula_models::subjects::*;
