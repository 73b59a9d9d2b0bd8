use std::future::Future;

use tower_http::trace::TraceLayer;

use tracing::info;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::routes;
use crate::state::AppState;

// Every route exposed by the mock, logged at startup.
const ROUTES: &[(&str, &str)] = &[
    ("GET", "/"),
    ("GET", "/api/attention"),
    ("POST", "/api/pin"),
    ("GET", "/api/status"),
    ("POST", "/api/invoices"),
    ("POST", "/api/invoices/search"),
    ("GET", "/api/invoices/{invoiceNumber}"),
    ("GET|POST", "/mock/lock"),
    ("GET|POST", "/mock/unlock"),
    ("GET", "/mock/current_api_attention"),
];

/// A server running the mock device indefinitely.
#[derive(Debug)]
pub struct Server {
    config: ServerConfig,
}

impl Server {
    /// Creates a [`Server`] from the given [`ServerConfig`].
    #[must_use]
    pub const fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Transforms the server into a [`GracefulShutdownServer`].
    ///
    /// The [`Future`] passed as input manages the graceful shutdown of
    /// the server.
    #[must_use]
    #[inline]
    pub fn with_graceful_shutdown<F>(self, signal: F) -> GracefulShutdownServer<F>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        GracefulShutdownServer {
            config: self.config,
            signal,
        }
    }

    /// Runs the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to start.
    pub async fn run(self) -> Result<()> {
        self.with_graceful_shutdown(std::future::pending())
            .run()
            .await
    }
}

/// A server with graceful shutdown.
///
/// Aside from the graceful shutdown functionality, it behaves the same
/// as [`Server`].
#[derive(Debug)]
pub struct GracefulShutdownServer<F> {
    // Server configuration.
    config: ServerConfig,
    // Graceful shutdown signal.
    signal: F,
}

impl<F> GracefulShutdownServer<F>
where
    F: Future<Output = ()> + Send + 'static,
{
    /// Runs the server with graceful shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to start.
    pub async fn run(self) -> Result<()> {
        // Create listener bind.
        let listener_bind = format!(
            "{}:{}",
            self.config.host_address(),
            self.config.server_port()
        );

        for (method, path) in ROUTES {
            info!("Server route: [{method}, \"{path}\"]");
        }

        // The single device instance every request goes through.
        let state = AppState::new(&self.config);

        let router = routes::router(state).layer(TraceLayer::new_for_http());

        // Print server Ip and port.
        info!("Device reachable at this HTTP address: {listener_bind}");

        // Create a new TCP socket which responds to the specified HTTP
        // address and port.
        let listener = tokio::net::TcpListener::bind(listener_bind).await?;

        // Print server start message
        info!("Starting server...");

        // Start the server
        axum::serve(listener, router)
            .with_graceful_shutdown(self.signal)
            .await?;

        Ok(())
    }
}
