use ethwire::TransportError;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Receives every raw notification of one transport-level subscription, in delivery order.
pub type NotificationCallback = Box<dyn FnMut(Value) + Send + 'static>;

/// Identifier the node assigned to a subscription.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransportSubscriptionId(pub String);

impl fmt::Display for TransportSubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The JSON-RPC transport this crate dispatches through.
///
/// Implementations own framing, connection management and retries; errors are returned
/// to callers untouched.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, TransportError>;

    async fn subscribe(
        &self,
        channel: &str,
        params: Vec<Value>,
        on_notification: NotificationCallback,
    ) -> Result<TransportSubscriptionId, TransportError>;

    async fn unsubscribe(&self, id: &TransportSubscriptionId) -> Result<(), TransportError>;
}

/// The client's current transport. Replaced wholesale when the provider changes; calls
/// already dispatched keep the transport they started with.
pub struct TransportSlot {
    current: RwLock<Arc<dyn Transport>>,
}

impl TransportSlot {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            current: RwLock::new(transport),
        }
    }

    pub fn current(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.current.read())
    }

    pub fn replace(&self, transport: Arc<dyn Transport>) -> Arc<dyn Transport> {
        std::mem::replace(&mut *self.current.write(), transport)
    }
}
