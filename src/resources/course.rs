//! Course resource. Course codes are stored uppercase regardless of how the
//! client sent them.

use crate::handlers::crud_routes;
use crate::resource::ResourceConfig;
use crate::state::AppState;
use crate::validation::{Rule, Schema};
use axum::Router;
use serde_json::Value;

fn uppercase_code(mut value: Value) -> Value {
    if let Some(Value::String(code)) = value.get_mut("code") {
        *code = code.to_ascii_uppercase();
    }
    value
}

pub fn routes() -> Router<AppState> {
    crud_routes(
        ResourceConfig::new("course")
            .select("id, title, code, credits, department_id")
            .create_schema(
                Schema::new()
                    .field("title", Rule::text().required().min_length(2).max_length(200))
                    .field("code", Rule::text().required().min_length(2).max_length(16))
                    .field("credits", Rule::number().minimum(0.0).maximum(30.0))
                    .field("department_id", Rule::uuid().required()),
            )
            .update_schema(
                Schema::new()
                    .field("id", Rule::uuid().required())
                    .field("title", Rule::text().min_length(2).max_length(200))
                    .field("code", Rule::text().min_length(2).max_length(16))
                    .field("credits", Rule::number().minimum(0.0).maximum(30.0))
                    .field("department_id", Rule::uuid()),
            )
            .before_insert(uppercase_code),
    )
}
