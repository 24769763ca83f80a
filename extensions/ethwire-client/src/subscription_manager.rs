use crate::subscription::{SharedRecord, SubscriptionRecord, flush};
use crate::{EventCallback, MethodInvoker, NotificationCallback, Subscription, TransportSlot};
use ethwire::context::DefaultContext;
use ethwire::format::{BlockRef, BlockTag};
use ethwire::subscription::{
    HandlerAction, NotificationHandler, NotificationHandlerKind, SubscriptionDescriptor,
    SubscriptionEvent, SubscriptionRegistry, SyncingConfig,
};
use ethwire::{EthWireError, EthWireResult};
use futures::channel::mpsc;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, trace, warn};

/// Opens and tears down push subscriptions and drives their handler timers.
#[derive(Clone)]
pub struct SubscriptionManager {
    registry: Arc<SubscriptionRegistry>,
    context: Arc<DefaultContext>,
    transport: Arc<TransportSlot>,
    invoker: MethodInvoker,
    syncing: SyncingConfig,
}

impl SubscriptionManager {
    pub fn new(
        registry: Arc<SubscriptionRegistry>,
        context: Arc<DefaultContext>,
        transport: Arc<TransportSlot>,
        invoker: MethodInvoker,
        syncing: SyncingConfig,
    ) -> Self {
        Self {
            registry,
            context,
            transport,
            invoker,
            syncing,
        }
    }

    pub fn registry(&self) -> &SubscriptionRegistry {
        &self.registry
    }

    pub async fn subscribe(&self, name: &str, args: Vec<Value>) -> EthWireResult<Subscription> {
        self.open(name, args, None).await
    }

    /// Like [`SubscriptionManager::subscribe`], additionally handing every event to
    /// `callback` before it is queued on the stream.
    pub async fn subscribe_with_callback<F>(
        &self,
        name: &str,
        args: Vec<Value>,
        callback: F,
    ) -> EthWireResult<Subscription>
    where
        F: FnMut(&SubscriptionEvent) + Send + 'static,
    {
        self.open(name, args, Some(Box::new(callback))).await
    }

    async fn open(
        &self,
        name: &str,
        args: Vec<Value>,
        callback: Option<EventCallback>,
    ) -> EthWireResult<Subscription> {
        let descriptor = self.registry.get(name)?.clone();
        let runtime = Handle::try_current().map_err(|e| EthWireError::Runtime(e.to_string()))?;

        let mut params = descriptor.encode(args, &self.context.snapshot())?;
        let replay_filter = match descriptor.handler_kind() {
            NotificationHandlerKind::Logs => take_replay_filter(&mut params),
            _ => None,
        };

        let (tx, rx) = mpsc::unbounded();
        let handler = NotificationHandler::new(descriptor.handler_kind(), self.syncing);
        let record: SharedRecord = Arc::new(Mutex::new(SubscriptionRecord::new(
            handler, tx, callback,
        )));

        // Past logs are queued before the live channel is opened, so they precede every
        // live notification.
        if let Some(filter) = replay_filter {
            let past = self.invoker.invoke("getPastLogs", vec![filter]).await?;
            replay_past_logs(&record, past);
        }

        let on_notification: NotificationCallback = {
            let record = Arc::clone(&record);
            let descriptor = descriptor.clone();
            Box::new(move |raw| on_notification(&record, &descriptor, &runtime, raw))
        };

        let id = self
            .transport
            .current()
            .subscribe(descriptor.wire_name(), params, on_notification)
            .await?;

        debug!(
            name = descriptor.name(),
            channel = descriptor.wire_name(),
            %id,
            "subscribed"
        );

        Ok(Subscription::new(id, descriptor.name(), record, rx))
    }

    /// Cancels handler timers, then releases the transport-level subscription. No event
    /// is emitted once this has started.
    pub async fn unsubscribe(&self, subscription: &Subscription) -> EthWireResult<()> {
        subscription.record.lock().close();

        debug!(name = subscription.name(), id = %subscription.id(), "unsubscribing");
        if let Err(err) = self.transport.current().unsubscribe(subscription.id()).await {
            warn!(id = %subscription.id(), error = %err, "transport unsubscribe failed");
            return Err(err.into());
        }
        Ok(())
    }
}

/// Removes `fromBlock` from an encoded log filter. Returns the full filter for the
/// history query when `fromBlock` names a concrete block (a number or `earliest`);
/// symbolic tags such as `latest` or `pending` have no history to replay.
fn take_replay_filter(params: &mut [Value]) -> Option<Value> {
    let filter = params.first_mut()?.as_object_mut()?;
    let from_block = filter.get("fromBlock")?;
    let replay = match BlockRef::from_value(from_block) {
        Ok(BlockRef::Number(_) | BlockRef::Tag(BlockTag::Earliest)) => {
            Some(Value::Object(filter.clone()))
        }
        _ => None,
    };

    filter.remove("fromBlock");
    replay
}

fn replay_past_logs(record: &SharedRecord, past: Value) {
    let Value::Array(logs) = past else {
        return;
    };

    {
        let mut guard = record.lock();
        for log in logs {
            for action in guard.handler.handle(log) {
                if let HandlerAction::Emit(event) = action {
                    guard.enqueue(event);
                }
            }
        }
    }
    flush(record);
}

fn on_notification(
    record: &SharedRecord,
    descriptor: &SubscriptionDescriptor,
    runtime: &Handle,
    raw: Value,
) {
    trace!(channel = descriptor.wire_name(), notification = %raw, "notification");

    {
        let mut guard = record.lock();
        if guard.closed {
            return;
        }

        let actions = match descriptor.decode(raw) {
            Ok(output) => guard.handler.handle(output),
            Err(err) => {
                warn!(channel = descriptor.wire_name(), error = %err, "undecodable notification");
                vec![HandlerAction::Emit(SubscriptionEvent::Error(err.into()))]
            }
        };

        for action in actions {
            match action {
                HandlerAction::Emit(event) => guard.enqueue(event),
                HandlerAction::ArmTimer { generation, delay } => {
                    if let Some(previous) = guard.stop_timer.take() {
                        previous.abort();
                    }
                    guard.stop_timer = Some(runtime.spawn(stop_timer(
                        Arc::clone(record),
                        generation,
                        delay,
                    )));
                }
            }
        }
    }
    flush(record);
}

async fn stop_timer(record: SharedRecord, generation: u64, delay: Duration) {
    tokio::time::sleep(delay).await;

    {
        let mut guard = record.lock();
        if guard.closed {
            return;
        }
        if let Some(event) = guard.handler.on_timer_elapsed(generation) {
            guard.enqueue(event);
        }
    }
    flush(&record);
}
