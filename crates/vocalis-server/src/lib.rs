mod account;
mod answer;
mod checkout;
mod convert;
mod cors;
mod error;
mod extract;
mod health;
mod identity;
mod notify;
mod state;
mod webhook;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use vocalis_answer::AnswerGenerator;
use vocalis_auth::IdentityResolver;
use vocalis_config::Config;
use vocalis_ledger::{DynCreditStore, FlatCost};
use vocalis_payments::{CheckoutClient, Reconciler};
use vocalis_speech::SynthesisProxy;

pub use error::ApiError;

use crate::notify::Notifier;
use crate::state::AppState;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server and its credit store from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the store or any upstream client cannot be built
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = vocalis_ledger::build_store(&config.ledger.store)?;
        Self::with_store(config, store)
    }

    /// Build the server around an already constructed credit store
    ///
    /// # Errors
    ///
    /// Returns an error if any upstream client cannot be built
    pub fn with_store(config: Config, store: DynCreditStore) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let resolver = IdentityResolver::from_config(&config.auth)?;
        let checkout = CheckoutClient::new(&config.payments, &config.server.public_origin)?;
        let reconciler = Reconciler::from_config(&config.payments, Arc::clone(&store));
        let speech = SynthesisProxy::from_config(&config.speech)
            .map_err(|e| anyhow::anyhow!("failed to initialize speech provider: {e}"))?;
        let answer = AnswerGenerator::from_config(&config.answer)?;

        let notifier = match config.notify.webhook_url {
            Some(url) => {
                let http = reqwest::Client::builder().timeout(Duration::from_secs(10)).build()?;
                Some(Notifier::spawn(url, http))
            }
            None => None,
        };

        let state = Arc::new(AppState {
            store,
            checkout,
            reconciler,
            speech,
            answer,
            notifier,
            cost: FlatCost::new(config.ledger.cost_per_conversion),
            welcome_credits: config.ledger.welcome_credits,
            history_limit: config.ledger.history_limit,
        });

        // Routes that need a resolved user
        let protected = Router::new()
            .route("/api/create-checkout-session", post(checkout::create_checkout_session))
            .route("/api/elevenlabs", post(convert::convert))
            .route("/api/credits", get(account::credits))
            .route("/api/history", get(account::history))
            .route("/api/welcome", post(account::welcome))
            .route_layer(axum::middleware::from_fn_with_state(
                resolver,
                identity::require_identity,
            ));

        let public = Router::new()
            .route("/api/stripe-webhook", post(webhook::stripe_webhook))
            .route("/api/generate-answer", post(answer::generate_answer));

        let mut app = protected.merge(public).with_state(state);

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health::health_handler));
        }

        app = app.layer(TraceLayer::new_for_http());

        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
