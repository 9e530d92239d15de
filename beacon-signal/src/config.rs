//! Signaling coordinator configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the signaling coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Room used when a join carries no room id (or an empty one).
    #[serde(default = "default_room")]
    pub default_room: String,

    /// Maximum number of queued outbound messages per connection.
    #[serde(default = "default_max_queue_size")]
    pub max_queue_size: usize,

    /// Maximum accepted inbound frame size in bytes.
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            default_room: default_room(),
            max_queue_size: default_max_queue_size(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

fn default_room() -> String {
    "lobby".to_owned()
}

const fn default_max_queue_size() -> usize {
    64
}

const fn default_max_frame_bytes() -> usize {
    64 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SignalConfig::default();
        assert_eq!(config.default_room, "lobby");
        assert_eq!(config.max_queue_size, 64);
        assert_eq!(config.max_frame_bytes, 64 * 1024);
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let config: SignalConfig = serde_json::from_str(r#"{"default_room":"hall"}"#).unwrap();
        assert_eq!(config.default_room, "hall");
        assert_eq!(config.max_queue_size, 64);
    }
}
