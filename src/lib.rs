//! Campus API: configuration-driven CRUD REST backend.
//!
//! The crate turns declarative [`resource::ResourceConfig`]s into axum
//! routers exposing list/create/update/delete over PostgreSQL, with a
//! uniform success/failure envelope across every endpoint.

pub mod backend;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod resource;
pub mod resources;
pub mod response;
pub mod routes;
pub mod sql;
pub mod state;
pub mod validation;

pub use backend::{Backend, ClientFactory, PgClientFactory};
pub use error::{ApiError, ErrorCode};
pub use handlers::crud_routes;
pub use resource::{Identity, ResourceConfig, Transform};
pub use response::{created, failure, ok, ok_paginated, Pagination};
pub use routes::{api_routes, common_routes};
pub use state::AppState;
pub use validation::{Rule, Schema};
