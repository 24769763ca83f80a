use ethwire::subscription::SyncingConfig;
use serde::{Deserialize, Serialize};

/// Client configuration, typically deserialized from the embedding application's config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EthClientConfig {
    pub syncing: SyncingConfig,
}
