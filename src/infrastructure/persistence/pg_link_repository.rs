//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Default upper bound for a single store operation.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

const LINK_COLUMNS: &str = "code, destination, clicks, last_clicked_at, created_at";

/// PostgreSQL repository for link storage and retrieval.
///
/// Uniqueness relies on the `links` primary key, and click counting on a
/// single `UPDATE ... SET clicks = clicks + 1` statement, so neither needs an
/// explicit transaction. Every query is bounded by `operation_timeout`.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
    operation_timeout: Duration,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::with_timeout(pool, DEFAULT_OPERATION_TIMEOUT)
    }

    /// Creates a repository with a custom per-operation timeout.
    pub fn with_timeout(pool: Arc<PgPool>, operation_timeout: Duration) -> Self {
        Self {
            pool,
            operation_timeout,
        }
    }

    /// Runs a query, converting both errors and timeouts into [`AppError`].
    async fn bounded<T, F>(&self, operation: &'static str, query: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.operation_timeout, query).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_ms = self.operation_timeout.as_millis() as u64,
                    "Link store operation timed out"
                );
                Err(AppError::unavailable(
                    "Link store operation timed out",
                    json!({
                        "operation": operation,
                        "timeout_ms": self.operation_timeout.as_millis() as u64,
                    }),
                ))
            }
        }
    }
}

fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        self.bounded(
            "exists",
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM links WHERE code = $1)")
                .bind(code)
                .fetch_one(self.pool.as_ref()),
        )
        .await
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!(
            "INSERT INTO links (code, destination) VALUES ($1, $2) RETURNING {LINK_COLUMNS}"
        );

        self.bounded(
            "insert",
            sqlx::query_as::<_, Link>(&sql)
                .bind(&new_link.code)
                .bind(&new_link.destination)
                .fetch_one(self.pool.as_ref()),
        )
        .await
        .map_err(|e| match e {
            AppError::Conflict { .. } => AppError::conflict(
                "Short code already exists",
                json!({ "code": new_link.code }),
            ),
            other => other,
        })
    }

    async fn find_by_code(&self, code: &str) -> Result<Link, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE code = $1");

        self.bounded(
            "find_by_code",
            sqlx::query_as::<_, Link>(&sql)
                .bind(code)
                .fetch_optional(self.pool.as_ref()),
        )
        .await?
        .ok_or_else(|| link_not_found(code))
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links ORDER BY created_at DESC, code ASC");

        self.bounded(
            "list_all",
            sqlx::query_as::<_, Link>(&sql).fetch_all(self.pool.as_ref()),
        )
        .await
    }

    async fn increment_clicks(&self, code: &str) -> Result<Link, AppError> {
        let sql = format!(
            r#"
            UPDATE links
            SET clicks = clicks + 1,
                last_clicked_at = GREATEST(NOW(), created_at)
            WHERE code = $1
            RETURNING {LINK_COLUMNS}
            "#
        );

        self.bounded(
            "increment_clicks",
            sqlx::query_as::<_, Link>(&sql)
                .bind(code)
                .fetch_optional(self.pool.as_ref()),
        )
        .await?
        .ok_or_else(|| link_not_found(code))
    }

    async fn delete(&self, code: &str) -> Result<(), AppError> {
        let result = self
            .bounded(
                "delete",
                sqlx::query("DELETE FROM links WHERE code = $1")
                    .bind(code)
                    .execute(self.pool.as_ref()),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(link_not_found(code));
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.bounded(
            "count",
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links").fetch_one(self.pool.as_ref()),
        )
        .await
    }
}
