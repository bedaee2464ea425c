pub use aula_models::areas::*;
