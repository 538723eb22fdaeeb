use serde::Serialize;
use tokio::sync::mpsc;
use url::Url;

#[derive(Debug, Serialize)]
struct SignupNotice {
    email: String,
}

/// Fire-and-forget sign-up notifications
///
/// Notices are queued on a channel and delivered by a background task, so a
/// slow or failing webhook never delays the response.
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::Sender<SignupNotice>,
}

impl Notifier {
    /// Spawn the delivery task
    pub fn spawn(webhook_url: Url, http: reqwest::Client) -> Self {
        let (tx, rx) = mpsc::channel(1_024);
        tokio::spawn(deliver_loop(webhook_url, http, rx));
        Self { tx }
    }

    /// Queue a notice (non-blocking, drops if the queue is full)
    pub fn signup(&self, email: &str) {
        let notice = SignupNotice {
            email: email.to_owned(),
        };

        if self.tx.try_send(notice).is_err() {
            tracing::warn!("sign-up notification queue full or closed, dropping notice");
        }
    }
}

async fn deliver_loop(webhook_url: Url, http: reqwest::Client, mut rx: mpsc::Receiver<SignupNotice>) {
    while let Some(notice) = rx.recv().await {
        let result = http
            .post(webhook_url.clone())
            .json(&notice)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status);

        match result {
            Ok(_) => tracing::debug!("sign-up notification delivered"),
            Err(e) => tracing::warn!(error = %e.without_url(), "failed to deliver sign-up notification"),
        }
    }
}
