//! Shared signaling state.

use std::sync::Arc;

use crate::config::SignalConfig;
use crate::registry::RoomRegistry;
use crate::router::MessageRouter;

/// Shared state for the signaling endpoint.
///
/// Passed explicitly through `axum::extract::State`; nothing in the
/// crate relies on process-wide singletons.
#[derive(Debug)]
pub struct SignalState {
    /// Signaling configuration.
    pub config: SignalConfig,
    /// Message router over the shared room registry.
    pub router: MessageRouter,
}

impl SignalState {
    /// Creates fresh signaling state with an empty registry.
    #[must_use]
    pub fn new(config: SignalConfig) -> Self {
        let registry = Arc::new(RoomRegistry::new());
        let router = MessageRouter::new(registry, &config);
        Self { config, router }
    }

    /// The shared room registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<RoomRegistry> {
        self.router.registry()
    }
}
