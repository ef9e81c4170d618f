mod common;

use std::sync::Arc;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_endpoint_store_down() {
    let repo = Arc::new(common::FlakyRepository::default());
    repo.break_updates();
    let server = common::server_for(repo);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
}

#[tokio::test]
async fn test_health_is_not_a_short_code() {
    let (server, repo) = common::create_test_server();

    server.get("/health").await.assert_status_ok();

    assert!(repo.is_empty());
}
