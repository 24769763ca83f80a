use super::{SubscriptionDescriptor, eth_subscriptions};
use crate::{EthWireError, EthWireResult};
use std::collections::HashMap;

/// Immutable map from logical subscription name to its descriptor.
#[derive(Clone, Debug)]
pub struct SubscriptionRegistry {
    descriptors: HashMap<&'static str, SubscriptionDescriptor>,
}

impl SubscriptionRegistry {
    pub fn new(descriptors: impl IntoIterator<Item = SubscriptionDescriptor>) -> Self {
        Self {
            descriptors: descriptors
                .into_iter()
                .map(|descriptor| (descriptor.name(), descriptor))
                .collect(),
        }
    }

    pub fn eth() -> Self {
        Self::new(eth_subscriptions())
    }

    pub fn get(&self, name: &str) -> EthWireResult<&SubscriptionDescriptor> {
        self.descriptors
            .get(name)
            .ok_or_else(|| EthWireError::Resolution(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.descriptors.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::eth()
    }
}
