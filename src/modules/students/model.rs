pub use aula_models::students::*;
