//! Generic CRUD endpoint factory.
//!
//! [`crud_routes`] turns one [`ResourceConfig`] into a router exposing four
//! verbs on the resource root: GET (paginated list), POST (create), PUT
//! (update by body id), DELETE (delete by body id). Each handler is a single
//! validate, execute, translate-result pipeline running inside
//! [`dispatch`], so every exit is an envelope.
//!
//! Body-parse faults are asymmetric: PUT maps malformed JSON to 400 locally,
//! while POST and DELETE let it collapse to the generic 500. Existing clients
//! rely on that shape; keep it when touching these handlers.

use crate::backend::Backend;
use crate::dispatch::dispatch;
use crate::error::ApiError;
use crate::resource::ResourceConfig;
use crate::response::{self, Pagination};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 1000;

/// Build list/create/update/delete routes for one resource.
pub fn crud_routes(config: ResourceConfig) -> Router<AppState> {
    let config = Arc::new(config);
    let list_cfg = config.clone();
    let create_cfg = config.clone();
    let update_cfg = config.clone();
    let delete_cfg = config;
    Router::new().route(
        "/",
        get(move |state: State<AppState>, query: Query<HashMap<String, String>>| {
            list(state, query, list_cfg.clone())
        })
        .post(move |state: State<AppState>, body: Bytes| create(state, body, create_cfg.clone()))
        .put(move |state: State<AppState>, body: Bytes| update(state, body, update_cfg.clone()))
        .delete(move |state: State<AppState>, body: Bytes| delete(state, body, delete_cfg.clone())),
    )
}

/// Lenient pagination parse: non-numeric or missing values fall back to the
/// defaults, then page is floored at 1 and pageSize clamped to [1, 1000].
fn parse_page(params: &HashMap<String, String>) -> (u32, u32) {
    let page = params
        .get("page")
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_PAGE)
        .max(1);
    let page_size = params
        .get("pageSize")
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    (page, page_size)
}

/// Row range for a page: [from, to] = [(page-1)*pageSize, page*pageSize - 1].
fn page_range(page: u32, page_size: u32) -> (u64, u64) {
    let from = (page as u64 - 1) * page_size as u64;
    (from, from + page_size as u64 - 1)
}

fn id_text(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    config: Arc<ResourceConfig>,
) -> Response {
    dispatch(state.factory.as_ref(), |client: Backend| async move {
        let (page, page_size) = parse_page(&params);
        let (from, _to) = page_range(page, page_size);
        let (rows, total) = client
            .select_page(&config.table, config.select_expr(), page_size, from)
            .await?;
        let data: Vec<Value> = rows
            .into_iter()
            .map(|row| config.after_get.apply(row))
            .collect();
        let pagination = Pagination::new(page, data.len(), total, page_size);
        Ok(response::ok_paginated(data, pagination))
    })
    .await
}

async fn create(
    State(state): State<AppState>,
    body: Bytes,
    config: Arc<ResourceConfig>,
) -> Response {
    dispatch(state.factory.as_ref(), |client: Backend| async move {
        let body: Value = serde_json::from_slice(&body).map_err(ApiError::internal)?;
        let validated = config.create_schema.validate(&body)?;
        let row = match config.before_insert.apply(Value::Object(validated)) {
            Value::Object(m) => m,
            _ => return Err(ApiError::internal("before_insert transform must return an object")),
        };
        let inserted = client
            .insert_returning(&config.table, &row)
            .await
            .map_err(ApiError::from_insert)?;
        Ok(response::created(inserted))
    })
    .await
}

async fn update(
    State(state): State<AppState>,
    body: Bytes,
    config: Arc<ResourceConfig>,
) -> Response {
    dispatch(state.factory.as_ref(), |client: Backend| async move {
        let body: Value = serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {}", e)))?;
        let mut validated = config.update_schema.validate(&body)?;
        let id = validated
            .remove("id")
            .ok_or_else(|| ApiError::BadRequest("id is required".to_string()))?;
        if validated.is_empty() {
            return Err(ApiError::BadRequest("no fields to update".to_string()));
        }
        let updated = client
            .update_returning(&config.table, &id, &validated)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!(
                    "{} with id {} not found",
                    config.display_name(),
                    id_text(&id)
                ))
            })?;
        Ok(response::ok(updated))
    })
    .await
}

async fn delete(
    State(state): State<AppState>,
    body: Bytes,
    config: Arc<ResourceConfig>,
) -> Response {
    dispatch(state.factory.as_ref(), |client: Backend| async move {
        let body: Value = serde_json::from_slice(&body).map_err(ApiError::internal)?;
        let id = body
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::BadRequest("id is required and must be a string".to_string()))?;
        let affected = client.delete_by_id(&config.table, id).await?;
        if affected == 0 {
            return Err(ApiError::NotFound(format!(
                "{} with id {} not found",
                config.display_name(),
                id
            )));
        }
        let message = format!("{} deleted successfully", config.display_name());
        Ok(response::ok(json!({ "message": message })))
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parse_page_defaults() {
        assert_eq!(parse_page(&params(&[])), (1, 10));
    }

    #[test]
    fn parse_page_ignores_garbage() {
        assert_eq!(parse_page(&params(&[("page", "abc"), ("pageSize", "-5")])), (1, 10));
    }

    #[test]
    fn parse_page_clamps() {
        assert_eq!(parse_page(&params(&[("page", "0"), ("pageSize", "0")])), (1, 1));
        assert_eq!(parse_page(&params(&[("pageSize", "5000")])), (1, 1000));
    }

    #[test]
    fn parse_page_accepts_valid_values() {
        assert_eq!(parse_page(&params(&[("page", "3"), ("pageSize", "25")])), (3, 25));
    }

    #[test]
    fn page_range_arithmetic() {
        assert_eq!(page_range(1, 10), (0, 9));
        assert_eq!(page_range(2, 10), (10, 19));
        assert_eq!(page_range(3, 7), (14, 20));
        assert_eq!(page_range(1, 1), (0, 0));
    }

    #[test]
    fn id_text_prefers_plain_strings() {
        assert_eq!(id_text(&json!("abc")), "abc");
        assert_eq!(id_text(&json!(7)), "7");
    }
}
