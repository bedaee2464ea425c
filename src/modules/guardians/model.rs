pub use aula_models::guardians::*;
