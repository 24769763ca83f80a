use super::{NotificationHandlerKind, SubscriptionDescriptor};
use crate::format::InputFormatter::Apply;
use crate::format::{input_formatters as input, output_formatters as output};

pub fn eth_subscriptions() -> Vec<SubscriptionDescriptor> {
    vec![
        SubscriptionDescriptor::new(
            "newBlockHeaders",
            "newHeads",
            vec![],
            NotificationHandlerKind::Data,
        )
        .with_output(output::block),
        SubscriptionDescriptor::new(
            "pendingTransactions",
            "newPendingTransactions",
            vec![],
            NotificationHandlerKind::Data,
        ),
        SubscriptionDescriptor::new(
            "logs",
            "logs",
            vec![Apply(input::log_filter)],
            NotificationHandlerKind::Logs,
        )
        .with_output(output::log),
        SubscriptionDescriptor::new(
            "syncing",
            "syncing",
            vec![],
            NotificationHandlerKind::Syncing,
        )
        .with_output(output::syncing),
    ]
}
