//! University resource.

use crate::handlers::crud_routes;
use crate::resource::ResourceConfig;
use crate::state::AppState;
use crate::validation::{Rule, Schema};
use axum::Router;

pub fn routes() -> Router<AppState> {
    crud_routes(
        ResourceConfig::new("university")
            .create_schema(
                Schema::new()
                    .field("name", Rule::text().required().min_length(2).max_length(200))
                    .field("location", Rule::text().max_length(200))
                    .field("website", Rule::text().pattern("^https?://")),
            )
            .update_schema(
                Schema::new()
                    .field("id", Rule::uuid().required())
                    .field("name", Rule::text().min_length(2).max_length(200))
                    .field("location", Rule::text().max_length(200))
                    .field("website", Rule::text().pattern("^https?://")),
            ),
    )
}
