#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;
use link_shortener::AppError;
use link_shortener::api::handlers::{health_handler, redirect_handler};
use link_shortener::api::routes::link_routes;
use link_shortener::domain::entities::{Link, NewLink};
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::infrastructure::persistence::InMemoryLinkRepository;
use link_shortener::state::AppState;

pub const BASE_URL: &str = "http://s.example.com";

/// State over a fresh in-memory store, plus a handle to that store.
pub fn create_test_state() -> (AppState, Arc<InMemoryLinkRepository>) {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let state = AppState::new(repo.clone(), BASE_URL);
    (state, repo)
}

/// Router with every handler but without rate limiting, which needs a peer address.
pub fn create_test_router(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", link_routes())
        .with_state(state)
}

pub fn create_test_server() -> (TestServer, Arc<InMemoryLinkRepository>) {
    let (state, repo) = create_test_state();
    let server = TestServer::new(create_test_router(state)).unwrap();
    (server, repo)
}

pub async fn create_test_link(repo: &InMemoryLinkRepository, code: &str, url: &str) -> Link {
    repo.insert(NewLink {
        code: code.to_string(),
        destination: url.to_string(),
    })
    .await
    .unwrap()
}

/// Store whose every operation fails as if the database timed out.
pub struct UnavailableRepository;

fn unavailable() -> AppError {
    AppError::unavailable("Link store operation timed out", json!({}))
}

#[async_trait]
impl LinkRepository for UnavailableRepository {
    async fn exists(&self, _code: &str) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn insert(&self, _new_link: NewLink) -> Result<Link, AppError> {
        Err(unavailable())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Link, AppError> {
        Err(unavailable())
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        Err(unavailable())
    }

    async fn increment_clicks(&self, _code: &str) -> Result<Link, AppError> {
        Err(unavailable())
    }

    async fn delete(&self, _code: &str) -> Result<(), AppError> {
        Err(unavailable())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(unavailable())
    }
}
