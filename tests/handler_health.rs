mod common;

use axum_test::TestServer;
use std::sync::Arc;
use link_shortener::state::AppState;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (server, repo) = common::create_test_server();
    common::create_test_link(&repo, "health1", "https://example.com").await;

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["store"]["message"], "Reachable, 1 links");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_endpoint_degraded_when_store_unavailable() {
    let state = AppState::new(Arc::new(common::UnavailableRepository), common::BASE_URL);
    let server = TestServer::new(common::create_test_router(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["store"]["status"], "error");
}
