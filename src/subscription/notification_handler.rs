use super::{SubscriptionEvent, SyncStatus, SyncingConfig, SyncingStateMachine};
use crate::EthWireError;
use serde_json::Value;
use std::time::Duration;

/// Which handler a subscription channel uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationHandlerKind {
    /// Every notification is a new item.
    Data,
    /// Log notifications; `removed: true` means the log was reorganized away.
    Logs,
    /// Debounced syncing status.
    Syncing,
}

/// What the runtime must do after a handler call.
#[derive(Clone, Debug, PartialEq)]
pub enum HandlerAction {
    Emit(SubscriptionEvent),
    /// Replace any pending timer of this subscription with one that fires after `delay`
    /// and reports `generation`.
    ArmTimer { generation: u64, delay: Duration },
}

/// Per-subscription handler state, owned by whoever owns the subscription and passed into
/// every notification.
#[derive(Clone, Debug)]
pub enum NotificationHandler {
    Data,
    Logs,
    Syncing(SyncingStateMachine),
}

impl NotificationHandler {
    pub fn new(kind: NotificationHandlerKind, config: SyncingConfig) -> Self {
        match kind {
            NotificationHandlerKind::Data => NotificationHandler::Data,
            NotificationHandlerKind::Logs => NotificationHandler::Logs,
            NotificationHandlerKind::Syncing => {
                NotificationHandler::Syncing(SyncingStateMachine::new(config))
            }
        }
    }

    pub fn kind(&self) -> NotificationHandlerKind {
        match self {
            NotificationHandler::Data => NotificationHandlerKind::Data,
            NotificationHandler::Logs => NotificationHandlerKind::Logs,
            NotificationHandler::Syncing(_) => NotificationHandlerKind::Syncing,
        }
    }

    /// Handles one notification that already went through the output formatter.
    pub fn handle(&mut self, output: Value) -> Vec<HandlerAction> {
        match self {
            NotificationHandler::Data => vec![HandlerAction::Emit(SubscriptionEvent::Data(output))],
            NotificationHandler::Logs => {
                let removed = output
                    .get("removed")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                let event = if removed {
                    SubscriptionEvent::Changed(output)
                } else {
                    SubscriptionEvent::Data(output)
                };
                vec![HandlerAction::Emit(event)]
            }
            NotificationHandler::Syncing(machine) => match SyncStatus::from_value(&output) {
                Ok(status) => machine.on_status(status, output),
                Err(err) => vec![HandlerAction::Emit(SubscriptionEvent::Error(
                    EthWireError::Decode(err),
                ))],
            },
        }
    }

    pub fn on_timer_elapsed(&mut self, generation: u64) -> Option<SubscriptionEvent> {
        match self {
            NotificationHandler::Syncing(machine) => machine.on_stop_timer_elapsed(generation),
            NotificationHandler::Data | NotificationHandler::Logs => None,
        }
    }

    pub fn cancel_timers(&mut self) {
        if let NotificationHandler::Syncing(machine) = self {
            machine.cancel_stop_timer();
        }
    }
}
