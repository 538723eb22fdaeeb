//! Checkout session creation tests

mod harness;

use harness::config::ConfigBuilder;
use harness::mock_upstream::MockUpstream;
use harness::server::TestServer;

#[tokio::test]
async fn checkout_returns_session_id() {
    let mock = MockUpstream::start().await.unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.url()).build()).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/create-checkout-session"))
        .bearer_auth(harness::token_for("u1"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["sessionId"], "cs_test_1");
    assert_eq!(mock.checkout_calls(), 1);
}

#[tokio::test]
async fn checkout_requires_identity() {
    let mock = MockUpstream::start().await.unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.url()).build()).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/create-checkout-session"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    assert_eq!(mock.checkout_calls(), 0);
}

#[tokio::test]
async fn checkout_does_not_touch_the_ledger() {
    let mock = MockUpstream::start().await.unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.url()).build()).await.unwrap();

    server
        .client()
        .post(server.url("/api/create-checkout-session"))
        .bearer_auth(harness::token_for("u1"))
        .send()
        .await
        .unwrap();

    assert_eq!(server.store().purchase_count(), 0);
    assert_eq!(server.get_json("u1", "/api/credits").await["balance"], 0);
}
