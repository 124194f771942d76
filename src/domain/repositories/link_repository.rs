//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for links, keyed by short code.
///
/// The store is the single source of truth and the synchronization point for
/// concurrent callers. Implementations must make [`insert`](Self::insert) and
/// [`increment_clicks`](Self::increment_clicks) atomic per code.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - process-local map
/// - Test mocks available with `cfg(test)`
///
/// # Errors
///
/// Any method may return [`AppError::Unavailable`] when the backing store
/// cannot answer in time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns whether a link with this code exists.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Inserts a new link with `clicks = 0` and no click timestamp.
    ///
    /// The uniqueness check and the write happen as one operation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    async fn find_by_code(&self, code: &str) -> Result<Link, AppError>;

    /// Lists every link, newest first.
    async fn list_all(&self) -> Result<Vec<Link>, AppError>;

    /// Atomically adds one click and stamps `last_clicked_at`.
    ///
    /// Returns the link as it is after the update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    async fn increment_clicks(&self, code: &str) -> Result<Link, AppError>;

    /// Permanently removes a link, freeing its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    async fn delete(&self, code: &str) -> Result<(), AppError>;

    /// Counts stored links.
    async fn count(&self) -> Result<i64, AppError>;
}
