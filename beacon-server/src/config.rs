//! Server configuration.
//!
//! Loaded from a YAML file, with listener fields overridable from the
//! command line and `BEACON_*` environment variables (see `main.rs`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use beacon_signal::SignalConfig;

use crate::error::ServerError;

/// Top-level server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    /// Listener settings.
    #[serde(default)]
    pub server: ListenConfig,

    /// Signaling coordinator settings.
    #[serde(default)]
    pub signal: SignalConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LogConfig,
}

/// Listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    /// Listen host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory of static assets served alongside the signaling
    /// endpoint (`/` resolves to `index.html`).
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_dir: default_public_dir(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level filter (`error`, `warn`, `info`, `debug`, `trace`),
    /// overridable with `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    3000
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl ServerConfig {
    /// Loads configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ServerError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ServerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_yaml::from_str(&raw)?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.server.host.is_empty() {
            return Err(ServerError::InvalidConfig(
                "server.host must not be empty".to_owned(),
            ));
        }
        if self.server.port == 0 {
            return Err(ServerError::InvalidConfig(
                "server.port must be non-zero".to_owned(),
            ));
        }
        if self.signal.default_room.is_empty() {
            return Err(ServerError::InvalidConfig(
                "signal.default_room must not be empty".to_owned(),
            ));
        }
        if self.signal.max_queue_size == 0 {
            return Err(ServerError::InvalidConfig(
                "signal.max_queue_size must be non-zero".to_owned(),
            ));
        }
        Ok(())
    }

    /// The listener bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.public_dir, PathBuf::from("public"));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_partial_yaml() {
        let raw = "server:\n  port: 8443\nsignal:\n  default_room: hall\n";
        let config: ServerConfig = serde_yaml::from_str(raw).unwrap();
        assert_eq!(config.server.port, 8443);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.signal.default_room, "hall");
        assert_eq!(config.signal.max_queue_size, 64);
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = ServerConfig::default();
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ServerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_default_room() {
        let mut config = ServerConfig::default();
        config.signal.default_room.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = ServerConfig::load(Path::new("/nonexistent/beacon.yaml"));
        assert!(matches!(result, Err(ServerError::ConfigRead { .. })));
    }
}
