//! Standard response envelope helpers.
//!
//! Every endpoint exit goes through one of these constructors (or through
//! [`crate::error::ApiError`], which builds its failure body with
//! [`failure`]), so all responses share a single wire shape:
//!
//! ```text
//! { "success": true,  "data": ..., "pagination"?: { ... } }
//! { "success": false, "error": { "code": ..., "message": ..., "details": ... } }
//! ```

use crate::error::ErrorCode;
use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Serialize)]
pub struct Success<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Pagination metadata for list responses. `page_size` is the number of rows
/// actually returned; `total_pages` is computed from the requested page size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(page: u32, returned: usize, total: u64, requested_size: u32) -> Self {
        Pagination {
            page,
            page_size: returned as u32,
            total,
            total_pages: total_pages(total, requested_size),
        }
    }
}

/// ceil(total / page_size). Zero rows means zero pages.
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size as u64)
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<Success<T>>) {
    (
        StatusCode::OK,
        Json(Success {
            success: true,
            data,
            pagination: None,
        }),
    )
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<Success<T>>) {
    (
        StatusCode::CREATED,
        Json(Success {
            success: true,
            data,
            pagination: None,
        }),
    )
}

pub fn ok_paginated<T: Serialize>(data: Vec<T>, pagination: Pagination) -> (StatusCode, Json<Success<Vec<T>>>) {
    (
        StatusCode::OK,
        Json(Success {
            success: true,
            data,
            pagination: Some(pagination),
        }),
    )
}

pub fn failure(code: ErrorCode, message: &str, details: Value) -> Value {
    json!({
        "success": false,
        "error": {
            "code": code.as_str(),
            "message": message,
            "details": details
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(3, 2), 2);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 1000), 1);
    }

    #[test]
    fn pagination_reports_returned_count_as_page_size() {
        let p = Pagination::new(1, 2, 3, 2);
        assert_eq!(p.page_size, 2);
        assert_eq!(p.total, 3);
        assert_eq!(p.total_pages, 2);
    }

    #[test]
    fn success_envelope_shape() {
        let (status, Json(body)) = ok(json!({"id": "x"}));
        assert_eq!(status, StatusCode::OK);
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["success"], json!(true));
        assert_eq!(v["data"]["id"], json!("x"));
        assert!(v.get("pagination").is_none());
    }

    #[test]
    fn paginated_envelope_uses_camel_case_keys() {
        let (_, Json(body)) = ok_paginated(vec![json!(1)], Pagination::new(2, 1, 21, 10));
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["pagination"]["page"], json!(2));
        assert_eq!(v["pagination"]["pageSize"], json!(1));
        assert_eq!(v["pagination"]["total"], json!(21));
        assert_eq!(v["pagination"]["totalPages"], json!(3));
    }

    #[test]
    fn failure_body_shape() {
        let v = failure(ErrorCode::NotFound, "course not found", json!({}));
        assert_eq!(v["success"], json!(false));
        assert_eq!(v["error"]["code"], json!("NOT_FOUND"));
        assert_eq!(v["error"]["message"], json!("course not found"));
    }
}
