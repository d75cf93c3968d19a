//! Typed errors, wire codes, and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use thiserror::Error;

/// Machine-readable wire codes, serialized into every failure envelope.
///
/// The full set is part of the published API surface and must stay stable;
/// the `SUPABASE_*` spellings in particular are matched by existing clients
/// and keep their historical names. Several codes are reserved: representable
/// here, but not produced by any current handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    Validation,
    NotFound,
    Unauthorized,
    Forbidden,
    BadRequest,
    NotInitialized,
    QueryError,
    ConnectionError,
    DuplicateEntry,
    Conflict,
    Internal,
    ServiceUnavailable,
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Validation => "VALIDATION_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::NotInitialized => "SUPABASE_NOT_INITIALIZED",
            ErrorCode::QueryError => "SUPABASE_QUERY_ERROR",
            ErrorCode::ConnectionError => "SUPABASE_CONNECTION_ERROR",
            ErrorCode::DuplicateEntry => "DUPLICATE_ENTRY",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::Internal => "INTERNAL_SERVER_ERROR",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCode::Unknown => "UNKNOWN_ERROR",
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("validation failed")]
    Validation { details: Value },
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("database client is not initialized")]
    NotInitialized,
    #[error("{0}")]
    Query(#[from] sqlx::Error),
    #[error("internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        ApiError::Internal(detail.to_string())
    }

    /// Map an insert fault: unique-constraint violations become conflicts,
    /// anything else stays a query error.
    pub fn from_insert(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                let details = json!({ "constraint": db.constraint() });
                return ApiError::Conflict {
                    message: db.message().to_string(),
                    details,
                };
            }
        }
        ApiError::Query(e)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Validation { .. } => ErrorCode::Validation,
            ApiError::BadRequest(_) => ErrorCode::BadRequest,
            ApiError::NotFound(_) => ErrorCode::NotFound,
            ApiError::Conflict { .. } => ErrorCode::Conflict,
            ApiError::NotInitialized => ErrorCode::NotInitialized,
            ApiError::Query(_) => ErrorCode::QueryError,
            ApiError::Internal(_) => ErrorCode::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::NotInitialized | ApiError::Query(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        if status.is_server_error() {
            match &self {
                // The generic message goes to the client; the detail only here.
                ApiError::Internal(detail) => tracing::error!(%detail, "request failed"),
                other => tracing::error!(error = %other, "request failed"),
            }
        }
        let message = self.to_string();
        let details = match self {
            ApiError::Validation { details } | ApiError::Conflict { details, .. } => details,
            _ => json!({}),
        };
        let body = crate::response::failure(code, &message, details);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_are_stable() {
        assert_eq!(ErrorCode::Validation.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::NotInitialized.as_str(), "SUPABASE_NOT_INITIALIZED");
        assert_eq!(ErrorCode::QueryError.as_str(), "SUPABASE_QUERY_ERROR");
        assert_eq!(ErrorCode::ConnectionError.as_str(), "SUPABASE_CONNECTION_ERROR");
        assert_eq!(ErrorCode::Conflict.as_str(), "CONFLICT");
        assert_eq!(ErrorCode::DuplicateEntry.as_str(), "DUPLICATE_ENTRY");
        assert_eq!(ErrorCode::ServiceUnavailable.as_str(), "SERVICE_UNAVAILABLE");
        assert_eq!(ErrorCode::Unknown.as_str(), "UNKNOWN_ERROR");
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::Validation { details: json!({}) }.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::NotInitialized.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::Internal("boom".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_error_message_is_generic() {
        let err = ApiError::Internal("connection string had a password in it".into());
        assert_eq!(err.to_string(), "internal server error");
    }

    #[test]
    fn validation_error_carries_details() {
        let err = ApiError::Validation {
            details: json!({"name": ["name is required"]}),
        };
        assert_eq!(err.code(), ErrorCode::Validation);
    }
}
