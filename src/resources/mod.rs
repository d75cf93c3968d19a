//! Resource route modules: pure configuration, one per entity.

pub mod college;
pub mod course;
pub mod department;
pub mod university;
