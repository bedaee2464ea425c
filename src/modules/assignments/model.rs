pub use aula_models::assignments::*;
