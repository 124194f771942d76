//! In-memory implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Process-local link store.
///
/// All mutations happen under a single write lock, which makes the
/// uniqueness check in [`insert`](LinkRepository::insert) and the
/// read-modify-write in [`increment_clicks`](LinkRepository::increment_clicks)
/// indivisible. Data is lost when the process exits.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: RwLock<HashMap<String, Link>>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Listing order shared with the PostgreSQL store: `created_at DESC, code ASC`.
fn newest_first(a: &Link, b: &Link) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.code.cmp(&b.code))
}

fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.read().await.contains_key(code))
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.write().await;

        match links.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": new_link.code }),
            )),
            Entry::Vacant(slot) => {
                let link = new_link.into_link(Utc::now());
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Link, AppError> {
        self.links
            .read()
            .await
            .get(code)
            .cloned()
            .ok_or_else(|| link_not_found(code))
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self.links.read().await.values().cloned().collect();
        links.sort_by(newest_first);
        Ok(links)
    }

    async fn increment_clicks(&self, code: &str) -> Result<Link, AppError> {
        let mut links = self.links.write().await;
        let link = links.get_mut(code).ok_or_else(|| link_not_found(code))?;

        link.record_click(Utc::now());
        Ok(link.clone())
    }

    async fn delete(&self, code: &str) -> Result<(), AppError> {
        self.links
            .write()
            .await
            .remove(code)
            .map(|_| ())
            .ok_or_else(|| link_not_found(code))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.links.read().await.len() as i64)
    }
}
