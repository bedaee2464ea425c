pub use aula_models::schedule_slots::*;
