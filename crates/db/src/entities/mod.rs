//! `SeaORM` entity definitions.

pub mod signs;
