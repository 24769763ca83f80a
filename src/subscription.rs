mod eth_subscriptions;
mod notification_handler;
mod subscription_descriptor;
mod subscription_event;
mod subscription_registry;
mod sync_status;
mod syncing_config;
mod syncing_state_machine;

pub use eth_subscriptions::eth_subscriptions;
pub use notification_handler::{HandlerAction, NotificationHandler, NotificationHandlerKind};
pub use subscription_descriptor::SubscriptionDescriptor;
pub use subscription_event::SubscriptionEvent;
pub use subscription_registry::SubscriptionRegistry;
pub use sync_status::{SyncProgress, SyncStatus};
pub use syncing_config::SyncingConfig;
pub use syncing_state_machine::{SyncingState, SyncingStateMachine};
