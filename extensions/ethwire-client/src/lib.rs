//! Tokio runtime for `ethwire`: dispatches calls through a [`Transport`], drives
//! subscription timers and owns the client's defaults.

mod config;
mod eth_client;
mod method_invoker;
mod subscription;
mod subscription_manager;
mod transport;

pub use config::EthClientConfig;
pub use eth_client::EthClient;
pub use method_invoker::MethodInvoker;
pub use subscription::{EventCallback, Subscription};
pub use subscription_manager::SubscriptionManager;
pub use transport::{NotificationCallback, Transport, TransportSlot, TransportSubscriptionId};
