use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_timeout_seconds() -> u64 {
    30
}

/// Settings shared by every outbound provider request
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl NetworkConfig {
    pub fn new() -> Self {
        let timeout_seconds = env::var("LEXICARD_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_seconds);

        Self { timeout_seconds }
    }

    /// Request timeout, never zero
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.max(1))
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
