//! Shared application state: the injected client factory. No per-request
//! mutable state lives here; every request gets its own backend handle.

use crate::backend::ClientFactory;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub factory: Arc<dyn ClientFactory>,
}

impl AppState {
    pub fn new(factory: impl ClientFactory + 'static) -> Self {
        AppState {
            factory: Arc::new(factory),
        }
    }
}
