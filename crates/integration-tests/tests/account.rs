//! Balance, history and welcome-grant tests

mod harness;

use std::time::Duration;

use harness::config::ConfigBuilder;
use harness::mock_upstream::MockUpstream;
use harness::server::TestServer;

async fn welcome(server: &TestServer, user_id: &str) -> serde_json::Value {
    server
        .client()
        .post(server.url("/api/welcome"))
        .bearer_auth(harness::token_for(user_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn credits_reports_balance() {
    let mock = MockUpstream::start().await.unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.url()).build()).await.unwrap();
    server.store().set_balance("u1", 42);

    assert_eq!(server.get_json("u1", "/api/credits").await["balance"], 42);
    assert_eq!(server.get_json("stranger", "/api/credits").await["balance"], 0);
}

#[tokio::test]
async fn identity_lookups_are_cached() {
    let mock = MockUpstream::start().await.unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.url()).build()).await.unwrap();

    server.get_json("u1", "/api/credits").await;
    server.get_json("u1", "/api/credits").await;

    assert_eq!(mock.auth_calls(), 1);
}

#[tokio::test]
async fn history_is_newest_first_and_scoped_to_user() {
    let mock = MockUpstream::start().await.unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.url()).build()).await.unwrap();
    server.store().set_balance("u1", 5);
    server.store().set_balance("u2", 5);

    for text in ["first", "second", "third"] {
        assert_eq!(server.convert("u1", text).await.status(), 200);
    }
    assert_eq!(server.convert("u2", "not yours").await.status(), 200);

    let history = server.get_json("u1", "/api/history").await;
    let entries = history.as_array().unwrap();
    let texts: Vec<_> = entries.iter().map(|e| e["text"].as_str().unwrap()).collect();

    assert_eq!(texts, ["third", "second", "first"]);
    assert_eq!(entries[0]["voice_id"], "rachel");
    assert_eq!(entries[0]["chars_used"], 5);
}

#[tokio::test]
async fn welcome_credits_are_granted_once() {
    let mock = MockUpstream::start().await.unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.url()).build()).await.unwrap();

    let first = welcome(&server, "u1").await;
    assert_eq!(first["granted"], true);
    assert_eq!(first["balance"], 100);

    let second = welcome(&server, "u1").await;
    assert_eq!(second["granted"], false);
    assert_eq!(second["balance"], 100);

    assert_eq!(server.get_json("u1", "/api/credits").await["balance"], 100);
}

#[tokio::test]
async fn first_welcome_sends_one_signup_notice() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new(&mock.url())
        .with_notify_url(&format!("{}/notify", mock.url()))
        .build();
    let server = TestServer::start(config).await.unwrap();

    assert_eq!(welcome(&server, "u1").await["granted"], true);
    assert_eq!(welcome(&server, "u1").await["granted"], false);

    // Delivery happens on a background task
    for _ in 0..50 {
        if mock.notify_calls() > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(mock.notify_calls(), 1);
}
