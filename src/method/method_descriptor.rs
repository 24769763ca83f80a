use super::WireRequest;
use crate::context::Defaults;
use crate::format::{FormatterPipeline, InputFormatter, OutputFormatFn};
use crate::resolve::CallResolver;
use crate::{DecodeError, EthWireError, EthWireResult};
use serde_json::Value;

/// Hook applied to the built request before dispatch.
pub type PayloadTransform = fn(&mut WireRequest);

/// Payload transform for calls whose wire parameter order is the reverse of the
/// logical order (e.g. `eth_sign`).
pub fn reverse_params(request: &mut WireRequest) {
    request.params.reverse();
}

/// Binds a logical operation to its wire method, arguments and result formatting.
///
/// The arity is the number of input formatters, so the two can never disagree.
#[derive(Clone, Debug)]
pub struct MethodDescriptor {
    name: &'static str,
    resolver: CallResolver,
    pipeline: FormatterPipeline,
    transform_payload: Option<PayloadTransform>,
}

impl MethodDescriptor {
    pub fn new(
        name: &'static str,
        resolver: impl Into<CallResolver>,
        inputs: Vec<InputFormatter>,
    ) -> Self {
        Self {
            name,
            resolver: resolver.into(),
            pipeline: FormatterPipeline::new(inputs, None),
            transform_payload: None,
        }
    }

    pub fn with_output(mut self, output: OutputFormatFn) -> Self {
        self.pipeline = self.pipeline.with_output(output);
        self
    }

    pub fn with_payload_transform(mut self, transform: PayloadTransform) -> Self {
        self.transform_payload = Some(transform);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> usize {
        self.pipeline.arity()
    }

    pub fn resolver(&self) -> &CallResolver {
        &self.resolver
    }

    /// Validates, resolves and encodes `args` into a wire request.
    pub fn to_request(&self, args: Vec<Value>, defaults: &Defaults) -> EthWireResult<WireRequest> {
        if args.len() != self.arity() {
            return Err(EthWireError::Arity {
                name: self.name.to_string(),
                expected: self.arity(),
                got: args.len(),
            });
        }

        let method = self.resolver.resolve(&args);
        let params = self.pipeline.encode(self.name, args, defaults)?;

        let mut request = WireRequest::new(method, params);
        if let Some(transform) = self.transform_payload {
            transform(&mut request);
        }

        Ok(request)
    }

    pub fn decode(&self, result: Value) -> Result<Value, DecodeError> {
        self.pipeline.decode(result)
    }
}
