use crate::EthWireError;
use serde_json::Value;

/// An event derived from one or more raw notifications.
#[derive(Clone, Debug, PartialEq)]
pub enum SubscriptionEvent {
    /// A new item (block header, transaction hash, log, sync progress).
    Data(Value),
    /// A state transition, distinct from raw data: syncing started/stopped, or a log
    /// invalidated by a chain reorganization.
    Changed(Value),
    /// A notification that could not be processed. The subscription stays alive.
    Error(EthWireError),
}

impl SubscriptionEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            SubscriptionEvent::Data(_) => "data",
            SubscriptionEvent::Changed(_) => "changed",
            SubscriptionEvent::Error(_) => "error",
        }
    }
}
