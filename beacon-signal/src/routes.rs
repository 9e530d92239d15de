//! Router assembly and introspection endpoints.

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::handler::ws_handler;
use crate::registry::RoomInfo;
use crate::state::SignalState;

/// Creates the signaling router.
///
/// - `GET /ws` — WebSocket upgrade for the signaling protocol
/// - `GET /health` — liveness probe
/// - `GET /rooms` — read-only room enumeration for operational tooling
pub fn create_router(state: Arc<SignalState>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .route("/rooms", get(rooms))
        .with_state(state)
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Number of rooms with at least one member.
    pub rooms: usize,
}

async fn health(State(state): State<Arc<SignalState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        rooms: state.registry().room_count(),
    })
}

async fn rooms(State(state): State<Arc<SignalState>>) -> Json<Vec<RoomInfo>> {
    Json(state.registry().rooms())
}
