//! # Webhook Server
//!
//! An `axum` server that receives security alert webhooks and hands the raw
//! body to the [`Relay`].
//!
//! Routes:
//! - `POST /`: the alert webhook. Always answers 200; the body is
//!   `Payload decode error` when the JSON could not be decoded, empty otherwise.
//! - `GET /health`: liveness probe.
//!
//! The server stops accepting requests when the shutdown channel fires.

use crate::relay::{Relay, DECODE_ERROR_RESPONSE};
use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, trace};

/// Builds the application router.
pub fn router(relay: Arc<Relay>) -> Router {
    Router::new()
        .route("/", post(receive_alert))
        .route("/health", get(|| async { "ok" }))
        .with_state(relay)
}

async fn receive_alert(State(relay): State<Arc<Relay>>, body: Bytes) -> Response {
    match relay.handle(&body).await {
        Ok(outcome) => {
            trace!(?outcome, "Alert webhook handled");
            ().into_response()
        }
        Err(_) => DECODE_ERROR_RESPONSE.into_response(),
    }
}

pub struct WebhookServer {
    listener: TcpListener,
    relay: Arc<Relay>,
    shutdown_rx: watch::Receiver<bool>,
}

impl WebhookServer {
    /// Creates a new `WebhookServer` but does not spawn it.
    ///
    /// # Arguments
    ///
    /// * `listener` - A `TcpListener` that has already been bound to an address.
    /// * `relay` - The relay every accepted webhook is passed to.
    /// * `shutdown_rx` - A watch channel receiver for graceful shutdown.
    pub fn new(listener: TcpListener, relay: Arc<Relay>, shutdown_rx: watch::Receiver<bool>) -> Self {
        Self {
            listener,
            relay,
            shutdown_rx,
        }
    }

    /// Returns a future that runs the server until a shutdown signal is received.
    pub fn run(self) -> impl Future<Output = ()> {
        let app = router(self.relay);
        let mut shutdown_rx = self.shutdown_rx;
        let listener = self.listener;

        async move {
            if let Ok(addr) = listener.local_addr() {
                info!(%addr, "Webhook server listening");
            }
            let shutdown = async move {
                while !*shutdown_rx.borrow_and_update() {
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
                trace!("Webhook server received shutdown signal.");
            };
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await
            {
                error!("Webhook server error: {}", e);
            }
            trace!("Webhook server task finished.");
        }
    }
}
