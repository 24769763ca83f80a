use crate::DecodeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncProgress {
    #[serde(default)]
    pub starting_block: u64,
    pub current_block: u64,
    pub highest_block: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_states: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pulled_states: Option<u64>,
}

impl SyncProgress {
    /// `current_block > highest_block - tip_threshold`, saturating at zero.
    pub fn is_near_tip(&self, tip_threshold: u64) -> bool {
        self.current_block > self.highest_block.saturating_sub(tip_threshold)
    }
}

/// Typed view of a formatted syncing status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncStatus {
    Syncing(SyncProgress),
    NotSyncing,
}

impl SyncStatus {
    /// Reads the output of [`crate::format::output_formatters::syncing`].
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Null | Value::Bool(false) => Ok(SyncStatus::NotSyncing),
            Value::Object(_) => serde_json::from_value(value.clone())
                .map(SyncStatus::Syncing)
                .map_err(|_| DecodeError::UnexpectedShape {
                    expected: "sync progress",
                    got: value.to_string(),
                }),
            other => Err(DecodeError::UnexpectedShape {
                expected: "syncing status",
                got: other.to_string(),
            }),
        }
    }

    pub fn is_syncing(&self) -> bool {
        matches!(self, SyncStatus::Syncing(_))
    }
}
