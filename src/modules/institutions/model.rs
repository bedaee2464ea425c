pub use aula_models::institutions::*;
