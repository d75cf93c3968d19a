//! College resource.

use crate::handlers::crud_routes;
use crate::resource::ResourceConfig;
use crate::state::AppState;
use crate::validation::{Rule, Schema};
use axum::Router;

pub fn routes() -> Router<AppState> {
    crud_routes(
        ResourceConfig::new("college")
            .create_schema(
                Schema::new()
                    .field("name", Rule::text().required().min_length(2).max_length(200))
                    .field("university_id", Rule::uuid().required())
                    .field("contact_email", Rule::email()),
            )
            .update_schema(
                Schema::new()
                    .field("id", Rule::uuid().required())
                    .field("name", Rule::text().min_length(2).max_length(200))
                    .field("university_id", Rule::uuid())
                    .field("contact_email", Rule::email()),
            ),
    )
}
