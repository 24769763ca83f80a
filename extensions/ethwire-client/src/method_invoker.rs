use crate::TransportSlot;
use ethwire::EthWireResult;
use ethwire::context::DefaultContext;
use ethwire::method::{MethodRegistry, WireRequest};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Validates, encodes, dispatches and decodes logical method calls.
#[derive(Clone)]
pub struct MethodInvoker {
    registry: Arc<MethodRegistry>,
    context: Arc<DefaultContext>,
    transport: Arc<TransportSlot>,
}

impl MethodInvoker {
    pub fn new(
        registry: Arc<MethodRegistry>,
        context: Arc<DefaultContext>,
        transport: Arc<TransportSlot>,
    ) -> Self {
        Self {
            registry,
            context,
            transport,
        }
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    /// Builds the wire request for `name` against the current defaults without sending it.
    pub fn prepare(&self, name: &str, args: Vec<Value>) -> EthWireResult<WireRequest> {
        self.registry
            .to_request(name, args, &self.context.snapshot())
    }

    /// Invokes the logical operation `name`.
    ///
    /// Defaults are read once, before the first suspension point, so a call keeps the
    /// defaults that were current when it was issued. Transport errors are returned
    /// unchanged.
    pub async fn invoke(&self, name: &str, args: Vec<Value>) -> EthWireResult<Value> {
        let descriptor = self.registry.get(name)?;
        let request = descriptor.to_request(args, &self.context.snapshot())?;

        debug!(
            name,
            method = %request.method,
            params = request.params.len(),
            "dispatching"
        );

        let transport = self.transport.current();
        let raw = transport.call(&request.method, request.params).await?;

        Ok(descriptor.decode(raw)?)
    }
}
