#![allow(dead_code)] // Each test binary uses a different subset of the mock.

use ethwire::TransportError;
use ethwire_client::{NotificationCallback, Transport, TransportSubscriptionId};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

// --- Test Setup: Mock Implementations ---

/// A scripted transport that records every request and keeps the notification callbacks
/// so tests can push notifications by hand.
#[derive(Default)]
pub struct MockTransport {
    pub calls: Mutex<Vec<(String, Vec<Value>)>>,
    pub subscribes: Mutex<Vec<(String, Vec<Value>)>>,
    pub unsubscribes: Mutex<Vec<TransportSubscriptionId>>,
    responses: Mutex<HashMap<String, VecDeque<Result<Value, TransportError>>>>,
    callbacks: Mutex<Vec<NotificationCallback>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues the result of the next call to `method`.
    pub fn respond(&self, method: &str, result: Result<Value, TransportError>) {
        self.responses
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(result);
    }

    /// Delivers a raw notification to the `index`-th subscription.
    pub fn notify(&self, index: usize, notification: Value) {
        let mut callbacks = self.callbacks.lock().unwrap();
        let callback = callbacks.get_mut(index).expect("no such subscription");
        callback(notification);
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn subscribes(&self) -> Vec<(String, Vec<Value>)> {
        self.subscribes.lock().unwrap().clone()
    }

    pub fn unsubscribes(&self) -> Vec<TransportSubscriptionId> {
        self.unsubscribes.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params));

        self.responses
            .lock()
            .unwrap()
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Ok(Value::Null))
    }

    async fn subscribe(
        &self,
        channel: &str,
        params: Vec<Value>,
        on_notification: NotificationCallback,
    ) -> Result<TransportSubscriptionId, TransportError> {
        self.subscribes
            .lock()
            .unwrap()
            .push((channel.to_string(), params));

        let mut callbacks = self.callbacks.lock().unwrap();
        callbacks.push(on_notification);
        Ok(TransportSubscriptionId(format!("0x{:x}", callbacks.len())))
    }

    async fn unsubscribe(&self, id: &TransportSubscriptionId) -> Result<(), TransportError> {
        self.unsubscribes.lock().unwrap().push(id.clone());
        Ok(())
    }
}
