//! Declarative resource configuration consumed by the CRUD factory.

use crate::validation::Schema;
use serde_json::Value;
use std::sync::Arc;

/// Named row-transform capability. `after_get` runs over each fetched row
/// before it leaves a list response; `before_insert` runs over the validated
/// payload before it is written.
pub trait Transform: Send + Sync {
    fn apply(&self, value: Value) -> Value;
}

/// Default transform: passes the value through unchanged.
pub struct Identity;

impl Transform for Identity {
    fn apply(&self, value: Value) -> Value {
        value
    }
}

impl<F> Transform for F
where
    F: Fn(Value) -> Value + Send + Sync,
{
    fn apply(&self, value: Value) -> Value {
        self(value)
    }
}

/// Everything the factory needs to expose one table: built once at router
/// construction, then captured by the generated handlers for the lifetime of
/// the process.
#[derive(Clone)]
pub struct ResourceConfig {
    pub table: String,
    pub resource_name: Option<String>,
    pub select: Option<String>,
    pub create_schema: Schema,
    pub update_schema: Schema,
    pub after_get: Arc<dyn Transform>,
    pub before_insert: Arc<dyn Transform>,
}

impl ResourceConfig {
    pub fn new(table: &str) -> Self {
        ResourceConfig {
            table: table.to_string(),
            resource_name: None,
            select: None,
            create_schema: Schema::new(),
            update_schema: Schema::new(),
            after_get: Arc::new(Identity),
            before_insert: Arc::new(Identity),
        }
    }

    pub fn resource_name(mut self, name: &str) -> Self {
        self.resource_name = Some(name.to_string());
        self
    }

    pub fn select(mut self, select: &str) -> Self {
        self.select = Some(select.to_string());
        self
    }

    pub fn create_schema(mut self, schema: Schema) -> Self {
        self.create_schema = schema;
        self
    }

    pub fn update_schema(mut self, schema: Schema) -> Self {
        self.update_schema = schema;
        self
    }

    pub fn after_get(mut self, transform: impl Transform + 'static) -> Self {
        self.after_get = Arc::new(transform);
        self
    }

    pub fn before_insert(mut self, transform: impl Transform + 'static) -> Self {
        self.before_insert = Arc::new(transform);
        self
    }

    /// Human-readable name for messages; defaults to the table name.
    pub fn display_name(&self) -> &str {
        self.resource_name.as_deref().unwrap_or(&self.table)
    }

    /// Selection expression for list queries; defaults to all columns.
    pub fn select_expr(&self) -> &str {
        self.select.as_deref().unwrap_or("*")
    }
}
