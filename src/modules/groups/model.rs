pub use aula_models::groups::*;
