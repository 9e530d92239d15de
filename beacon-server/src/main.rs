//! Beacon rendezvous relay entry point.
//!
//! ```bash
//! # Run with defaults (0.0.0.0:3000, ./public)
//! beacon-server
//!
//! # Run with a configuration file
//! beacon-server --config /etc/beacon/beacon.yaml
//!
//! # Environment overrides
//! BEACON_PORT=8080 beacon-server
//! ```

use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use beacon_server::{RelayServer, ServerConfig, ServerError, ShutdownController};

/// Beacon rendezvous relay: WebRTC signaling plus static asset hosting.
#[derive(Parser, Debug)]
#[command(name = "beacon-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "beacon.yaml")]
    config: PathBuf,

    /// Override listen host
    #[arg(long, env = "BEACON_HOST")]
    host: Option<String>,

    /// Override listen port
    #[arg(long, env = "BEACON_PORT")]
    port: Option<u16>,

    /// Override static asset directory
    #[arg(long, env = "BEACON_PUBLIC_DIR")]
    public_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Validate configuration and exit
    #[arg(long)]
    validate: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if args.validate {
        println!("configuration is valid");
        return;
    }

    init_logging(&config);

    match run_server(config).await {
        Ok(()) => info!("beacon server stopped"),
        Err(e) => {
            error!("server error: {e}");
            std::process::exit(1);
        }
    }
}

/// Loads configuration from file and applies CLI overrides.
fn load_config(args: &Args) -> Result<ServerConfig, ServerError> {
    let mut config = if args.config.exists() {
        ServerConfig::load(&args.config)?
    } else {
        eprintln!(
            "configuration file not found: {}, using defaults",
            args.config.display()
        );
        ServerConfig::default()
    };

    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(public_dir) = &args.public_dir {
        config.server.public_dir.clone_from(public_dir);
    }
    if args.debug {
        config.logging.level = "debug".to_owned();
    }

    config.validate()?;
    Ok(config)
}

/// Initializes the tracing subscriber; `RUST_LOG` wins over the
/// configured level.
fn init_logging(config: &ServerConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let shutdown = ShutdownController::new();
    shutdown.listen_for_signals();

    RelayServer::new(config).run(shutdown).await
}
