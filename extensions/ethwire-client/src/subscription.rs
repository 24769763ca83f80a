use crate::TransportSubscriptionId;
use ethwire::subscription::{NotificationHandler, SubscriptionEvent};
use futures::Stream;
use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::task::JoinHandle;

/// Observes every event of a subscription before it is queued on the stream.
pub type EventCallback = Box<dyn FnMut(&SubscriptionEvent) + Send + 'static>;

/// Where events leave the subscription: the caller's callback, then the stream.
struct EventSink {
    events: UnboundedSender<SubscriptionEvent>,
    callback: Option<EventCallback>,
}

impl EventSink {
    fn deliver(&mut self, event: SubscriptionEvent) {
        if let Some(callback) = self.callback.as_mut() {
            callback(&event);
        }
        // The receiver may already be gone; the subscription keeps running regardless.
        let _ = self.events.unbounded_send(event);
    }
}

/// Mutable state of one live subscription: its handler record, the pending debounce
/// timer and the queue of events not yet delivered.
///
/// Events are queued under the record lock and delivered by [`flush`] with the lock
/// released, so a callback may drop or inspect its own subscription.
pub(crate) struct SubscriptionRecord {
    pub(crate) handler: NotificationHandler,
    pub(crate) stop_timer: Option<JoinHandle<()>>,
    pub(crate) closed: bool,
    queue: VecDeque<SubscriptionEvent>,
    // Taken by whichever caller is currently flushing.
    sink: Option<EventSink>,
    events: UnboundedSender<SubscriptionEvent>,
}

pub(crate) type SharedRecord = Arc<Mutex<SubscriptionRecord>>;

impl SubscriptionRecord {
    pub(crate) fn new(
        handler: NotificationHandler,
        events: UnboundedSender<SubscriptionEvent>,
        callback: Option<EventCallback>,
    ) -> Self {
        Self {
            handler,
            stop_timer: None,
            closed: false,
            queue: VecDeque::new(),
            sink: Some(EventSink {
                events: events.clone(),
                callback,
            }),
            events,
        }
    }

    /// Queues `event` for delivery by the next [`flush`].
    pub(crate) fn enqueue(&mut self, event: SubscriptionEvent) {
        if !self.closed {
            self.queue.push_back(event);
        }
    }

    /// Stops all further emission and cancels the pending timer. Idempotent.
    pub(crate) fn close(&mut self) {
        self.closed = true;
        self.queue.clear();
        if let Some(timer) = self.stop_timer.take() {
            timer.abort();
        }
        self.handler.cancel_timers();
        self.events.close_channel();
    }
}

/// Delivers queued events in FIFO order without holding the record lock.
///
/// Only one caller delivers at a time; a caller that finds the sink taken returns at
/// once and the current holder picks up its events.
pub(crate) fn flush(record: &SharedRecord) {
    let Some(mut sink) = record.lock().sink.take() else {
        return;
    };

    loop {
        let event = {
            let mut guard = record.lock();
            match guard.queue.pop_front() {
                Some(event) if !guard.closed => event,
                _ => {
                    guard.queue.clear();
                    guard.sink = Some(sink);
                    return;
                }
            }
        };
        sink.deliver(event);
    }
}

/// A live subscription. Yields its events as a [`Stream`].
///
/// Dropping it stops event delivery and cancels pending timers, but the node-side
/// subscription is only released by
/// [`SubscriptionManager::unsubscribe`](crate::SubscriptionManager::unsubscribe).
pub struct Subscription {
    id: TransportSubscriptionId,
    name: &'static str,
    pub(crate) record: SharedRecord,
    events: UnboundedReceiver<SubscriptionEvent>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Subscription {
    pub(crate) fn new(
        id: TransportSubscriptionId,
        name: &'static str,
        record: SharedRecord,
        events: UnboundedReceiver<SubscriptionEvent>,
    ) -> Self {
        Self {
            id,
            name,
            record,
            events,
        }
    }

    pub fn id(&self) -> &TransportSubscriptionId {
        &self.id
    }

    /// Logical name the subscription was opened with.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_closed(&self) -> bool {
        self.record.lock().closed
    }

    /// Next queued event without waiting.
    pub fn try_next_event(&mut self) -> Option<SubscriptionEvent> {
        self.events.try_recv().ok()
    }
}

impl Stream for Subscription {
    type Item = SubscriptionEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().events).poll_next(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.record.lock().close();
    }
}
