use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::env_parse;

fn default_interval_ms() -> u64 {
    4000
}

fn default_keyboard_poll_ms() -> u64 {
    100
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct MonitorConfig {
    /// Time between two capture ticks
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// How often the keyboard listener wakes up to check for shutdown
    #[serde(default = "default_keyboard_poll_ms")]
    pub keyboard_poll_ms: u64,
}

impl MonitorConfig {
    pub fn new() -> Self {
        Self {
            interval_ms: env_parse("WINWATCH_INTERVAL_MS").unwrap_or_else(default_interval_ms),
            keyboard_poll_ms: env_parse("WINWATCH_KEYBOARD_POLL_MS")
                .unwrap_or_else(default_keyboard_poll_ms),
        }
    }

    pub fn interval(&self) -> Duration {
        // A zero period would make tokio's interval panic
        Duration::from_millis(self.interval_ms.max(1))
    }

    pub fn keyboard_poll(&self) -> Duration {
        Duration::from_millis(self.keyboard_poll_ms.max(1))
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            keyboard_poll_ms: default_keyboard_poll_ms(),
        }
    }
}
