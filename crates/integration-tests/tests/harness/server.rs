//! Test server wrapper that starts Vocalis on a random port

use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use vocalis_config::Config;
use vocalis_ledger::MemoryStore;
use vocalis_server::Server;

/// A running test server instance backed by an in-memory credit store
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
    store: Arc<MemoryStore>,
}

impl TestServer {
    /// Start a test server with the given configuration
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        let store = Arc::new(MemoryStore::new());
        let server = Server::with_store(config, store.clone())?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind the listener here so we know the actual port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        let client = reqwest::Client::new();

        Ok(Self {
            addr,
            shutdown,
            client,
            store,
        })
    }

    /// Base URL of the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// The credit store the server reads and writes
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// POST a webhook delivery with an optional signature header
    pub async fn deliver_webhook(&self, body: &[u8], signature: Option<&str>) -> reqwest::Response {
        let mut request = self
            .client
            .post(self.url("/api/stripe-webhook"))
            .header("content-type", "application/json")
            .body(body.to_vec());

        if let Some(signature) = signature {
            request = request.header("stripe-signature", signature);
        }

        request.send().await.expect("webhook request")
    }

    /// POST a conversion as `user_id`
    pub async fn convert(&self, user_id: &str, text: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/elevenlabs"))
            .bearer_auth(super::token_for(user_id))
            .json(&serde_json::json!({ "text": text, "voice": "rachel" }))
            .send()
            .await
            .expect("conversion request")
    }

    /// GET a protected JSON endpoint as `user_id`
    pub async fn get_json(&self, user_id: &str, path: &str) -> serde_json::Value {
        self.client
            .get(self.url(path))
            .bearer_auth(super::token_for(user_id))
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("json body")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
