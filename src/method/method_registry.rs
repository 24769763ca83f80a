use super::{MethodDescriptor, WireRequest, eth_methods};
use crate::context::Defaults;
use crate::{EthWireError, EthWireResult};
use serde_json::Value;
use std::collections::HashMap;

/// Immutable map from logical operation name to its descriptor.
///
/// Built once, before any call is dispatched. A later descriptor with the same name
/// replaces an earlier one.
#[derive(Clone, Debug)]
pub struct MethodRegistry {
    descriptors: HashMap<&'static str, MethodDescriptor>,
}

impl MethodRegistry {
    pub fn new(descriptors: impl IntoIterator<Item = MethodDescriptor>) -> Self {
        Self {
            descriptors: descriptors
                .into_iter()
                .map(|descriptor| (descriptor.name(), descriptor))
                .collect(),
        }
    }

    /// Registry holding the standard `eth` namespace.
    pub fn eth() -> Self {
        Self::new(eth_methods())
    }

    pub fn get(&self, name: &str) -> EthWireResult<&MethodDescriptor> {
        self.descriptors
            .get(name)
            .ok_or_else(|| EthWireError::Resolution(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
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

    /// Looks up `name` and builds its wire request.
    pub fn to_request(
        &self,
        name: &str,
        args: Vec<Value>,
        defaults: &Defaults,
    ) -> EthWireResult<WireRequest> {
        self.get(name)?.to_request(args, defaults)
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::eth()
    }
}
