//! Per-request dispatch: client acquisition and fault translation.

use crate::backend::{Backend, ClientFactory};
use crate::error::ApiError;
use axum::response::{IntoResponse, Response};
use std::future::Future;

/// Acquire a client from the factory and run the endpoint body with it.
///
/// A factory yielding no client maps to the published not-initialized
/// failure; every endpoint fault is translated into the failure envelope at
/// the [`ApiError`] boundary, so nothing escapes un-enveloped.
pub async fn dispatch<F, Fut, R>(factory: &dyn ClientFactory, body: F) -> Response
where
    F: FnOnce(Backend) -> Fut,
    Fut: Future<Output = Result<R, ApiError>>,
    R: IntoResponse,
{
    let Some(client) = factory.client().await else {
        return ApiError::NotInitialized.into_response();
    };
    match body(client).await {
        Ok(resp) => resp.into_response(),
        Err(err) => err.into_response(),
    }
}
