//! Department resource.

use crate::handlers::crud_routes;
use crate::resource::ResourceConfig;
use crate::state::AppState;
use crate::validation::{Rule, Schema};
use axum::Router;

pub fn routes() -> Router<AppState> {
    crud_routes(
        ResourceConfig::new("department")
            .create_schema(
                Schema::new()
                    .field("name", Rule::text().required().min_length(2).max_length(200))
                    .field("college_id", Rule::uuid().required())
                    .field("head", Rule::text().max_length(120)),
            )
            .update_schema(
                Schema::new()
                    .field("id", Rule::uuid().required())
                    .field("name", Rule::text().min_length(2).max_length(200))
                    .field("college_id", Rule::uuid())
                    .field("head", Rule::text().max_length(120)),
            ),
    )
}
