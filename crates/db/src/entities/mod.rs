//! `SeaORM` entity definitions.

pub mod professors;
pub mod students;
