//! HTTP handlers generated by the CRUD factory.

pub mod crud;

pub use crud::crud_routes;
