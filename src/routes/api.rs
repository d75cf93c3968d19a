//! The /api surface: one CRUD router per campus resource.

use crate::resources::{college, course, department, university};
use crate::state::AppState;
use axum::Router;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/course", course::routes())
        .nest("/college", college::routes())
        .nest("/university", university::routes())
        .nest("/department", department::routes())
}
