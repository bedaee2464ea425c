pub use aula_models::users::*;
