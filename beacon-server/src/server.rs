//! Relay server assembly.

use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

use beacon_signal::{SignalState, create_router};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::shutdown::ShutdownController;

/// The rendezvous relay server: signaling endpoint plus static assets
/// on one listener.
pub struct RelayServer {
    config: ServerConfig,
    state: Arc<SignalState>,
}

impl RelayServer {
    /// Creates a relay server from configuration.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let state = Arc::new(SignalState::new(config.signal.clone()));
        Self { config, state }
    }

    /// The shared signaling state.
    #[must_use]
    pub fn state(&self) -> &Arc<SignalState> {
        &self.state
    }

    /// Runs the server until `shutdown` fires.
    pub async fn run(self, shutdown: ShutdownController) -> Result<(), ServerError> {
        let addr = self.config.bind_address();

        // Requests that match no signaling route fall through to the
        // static asset directory; ServeDir resolves `/` to index.html
        // and rejects path traversal.
        let app = create_router(self.state.clone())
            .fallback_service(ServeDir::new(&self.config.server.public_dir))
            .layer(TraceLayer::new_for_http());

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        info!("relay server listening on http://{addr}/");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.wait_for_shutdown().await })
            .await
            .map_err(ServerError::Serve)?;

        info!("relay server stopped");
        Ok(())
    }
}
