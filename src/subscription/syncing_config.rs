use crate::constants::{DEFAULT_SYNC_DEBOUNCE_MS, DEFAULT_SYNC_TIP_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning of the syncing subscription's stop debounce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncingConfig {
    /// Quiet period before a stop is reported.
    pub debounce_ms: u64,
    /// A node within this many blocks of the highest block counts as caught up.
    pub tip_threshold: u64,
}

impl SyncingConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SyncingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_SYNC_DEBOUNCE_MS,
            tip_threshold: DEFAULT_SYNC_TIP_THRESHOLD,
        }
    }
}
