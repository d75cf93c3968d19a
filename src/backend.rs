//! Backend client acquisition and query execution.
//!
//! A [`Backend`] is a per-request query handle: cheap to hand out, holding a
//! pool reference that checks out connections only when a statement runs.
//! [`ClientFactory`] is the injected factory supplying one handle per
//! request; the production implementation is [`PgClientFactory`].

use crate::sql;
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct Backend {
    pool: PgPool,
}

impl Backend {
    pub fn new(pool: PgPool) -> Self {
        Backend { pool }
    }

    /// One page of rows plus the exact total count.
    pub async fn select_page(
        &self,
        table: &str,
        select: &str,
        limit: u32,
        offset: u64,
    ) -> Result<(Vec<Value>, u64), sqlx::Error> {
        let stmt = sql::select_page(table, select, limit, offset);
        tracing::debug!(sql = %stmt, "query");
        let rows = sqlx::query(&stmt).fetch_all(&self.pool).await?;
        let rows: Vec<Value> = rows
            .iter()
            .map(|r| r.try_get("row").unwrap_or(Value::Null))
            .collect();

        let stmt = sql::count(table);
        tracing::debug!(sql = %stmt, "query");
        let total: i64 = sqlx::query_scalar(&stmt).fetch_one(&self.pool).await?;
        Ok((rows, total.max(0) as u64))
    }

    /// Insert one row and return it.
    pub async fn insert_returning(
        &self,
        table: &str,
        row: &Map<String, Value>,
    ) -> Result<Value, sqlx::Error> {
        let stmt = sql::insert(table, row);
        tracing::debug!(sql = %stmt, "query");
        let mut query = sqlx::query(&stmt);
        if !row.is_empty() {
            query = query.bind(Value::Object(row.clone()));
        }
        let rec = query.fetch_one(&self.pool).await?;
        Ok(rec.try_get("row").unwrap_or(Value::Null))
    }

    /// Update the row matching `id`, setting only `fields`. Returns the
    /// updated row, or None when no row matched.
    pub async fn update_returning(
        &self,
        table: &str,
        id: &Value,
        fields: &Map<String, Value>,
    ) -> Result<Option<Value>, sqlx::Error> {
        let stmt = sql::update_by_id(table, fields);
        tracing::debug!(sql = %stmt, "query");
        let mut payload = fields.clone();
        payload.insert("id".to_string(), id.clone());
        let rec = sqlx::query(&stmt)
            .bind(Value::Object(payload))
            .fetch_optional(&self.pool)
            .await?;
        Ok(rec.map(|r| r.try_get("row").unwrap_or(Value::Null)))
    }

    /// Delete the row matching `id`, returning the affected-row count.
    pub async fn delete_by_id(&self, table: &str, id: &str) -> Result<u64, sqlx::Error> {
        let stmt = sql::delete_by_id(table);
        tracing::debug!(sql = %stmt, "query");
        let payload = serde_json::json!({ "id": id });
        let result = sqlx::query(&stmt).bind(payload).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Liveness probe for readiness checks.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Asynchronous factory supplying one backend client per request. Yields
/// `None` when the backend was never configured; callers map that to the
/// published not-initialized failure.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn client(&self) -> Option<Backend>;
}

/// Production factory over a PostgreSQL pool. The pool is created lazily, so
/// construction succeeds before the database is reachable; a missing or
/// unparsable `DATABASE_URL` yields a factory that hands out no clients.
pub struct PgClientFactory {
    pool: Option<PgPool>,
}

impl PgClientFactory {
    pub fn new(pool: PgPool) -> Self {
        PgClientFactory { pool: Some(pool) }
    }

    pub fn uninitialized() -> Self {
        PgClientFactory { pool: None }
    }

    pub fn from_env() -> Self {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            tracing::warn!("DATABASE_URL not set, backend disabled");
            return Self::uninitialized();
        };
        match PgPoolOptions::new().max_connections(5).connect_lazy(&url) {
            Ok(pool) => Self::new(pool),
            Err(e) => {
                tracing::warn!(error = %e, "invalid DATABASE_URL, backend disabled");
                Self::uninitialized()
            }
        }
    }
}

#[async_trait]
impl ClientFactory for PgClientFactory {
    async fn client(&self) -> Option<Backend> {
        self.pool.clone().map(Backend::new)
    }
}
