pub use aula_models::grades::*;
