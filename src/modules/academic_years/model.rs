pub use aula_models::academic_years::*;
