use super::NotificationHandlerKind;
use crate::context::Defaults;
use crate::format::{FormatterPipeline, InputFormatter, OutputFormatFn};
use crate::{DecodeError, EthWireResult};
use serde_json::Value;

/// Binds a logical subscription name to its wire channel, formatters and handler.
#[derive(Clone, Debug)]
pub struct SubscriptionDescriptor {
    name: &'static str,
    wire_name: &'static str,
    pipeline: FormatterPipeline,
    handler: NotificationHandlerKind,
}

impl SubscriptionDescriptor {
    pub fn new(
        name: &'static str,
        wire_name: &'static str,
        inputs: Vec<InputFormatter>,
        handler: NotificationHandlerKind,
    ) -> Self {
        Self {
            name,
            wire_name,
            pipeline: FormatterPipeline::new(inputs, None),
            handler,
        }
    }

    pub fn with_output(mut self, output: OutputFormatFn) -> Self {
        self.pipeline = self.pipeline.with_output(output);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn wire_name(&self) -> &'static str {
        self.wire_name
    }

    pub fn arity(&self) -> usize {
        self.pipeline.arity()
    }

    pub fn handler_kind(&self) -> NotificationHandlerKind {
        self.handler
    }

    pub fn encode(&self, args: Vec<Value>, defaults: &Defaults) -> EthWireResult<Vec<Value>> {
        self.pipeline.encode(self.name, args, defaults)
    }

    pub fn decode(&self, notification: Value) -> Result<Value, DecodeError> {
        self.pipeline.decode(notification)
    }
}
