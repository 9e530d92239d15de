//! # Beacon Server
//!
//! Operational shell for the Beacon rendezvous relay: configuration
//! loading, CLI, static asset hosting, and graceful shutdown around the
//! signaling coordinator from `beacon-signal`.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod server;
pub mod shutdown;

pub use config::ServerConfig;
pub use error::ServerError;
pub use server::RelayServer;
pub use shutdown::ShutdownController;
