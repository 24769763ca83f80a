use crate::context::Defaults;
use crate::{DecodeError, EthWireError, EthWireResult, FormatError};
use serde_json::Value;

/// Transforms one caller argument into its wire form.
pub type InputFormatFn = fn(Value, &Defaults) -> Result<Value, FormatError>;

/// Transforms a raw wire result into the caller-facing result.
pub type OutputFormatFn = fn(Value) -> Result<Value, DecodeError>;

#[derive(Clone, Copy, Debug)]
pub enum InputFormatter {
    /// The argument is already wire compatible (e.g. a hash).
    Passthrough,
    Apply(InputFormatFn),
}

impl InputFormatter {
    pub fn format(&self, value: Value, defaults: &Defaults) -> Result<Value, FormatError> {
        match self {
            InputFormatter::Passthrough => Ok(value),
            InputFormatter::Apply(format) => format(value, defaults),
        }
    }
}

/// Positional input formatters plus an optional output formatter.
#[derive(Clone, Debug, Default)]
pub struct FormatterPipeline {
    inputs: Vec<InputFormatter>,
    output: Option<OutputFormatFn>,
}

impl FormatterPipeline {
    pub fn new(inputs: Vec<InputFormatter>, output: Option<OutputFormatFn>) -> Self {
        Self { inputs, output }
    }

    pub fn with_output(mut self, output: OutputFormatFn) -> Self {
        self.output = Some(output);
        self
    }

    pub fn arity(&self) -> usize {
        self.inputs.len()
    }

    /// Encodes caller arguments into wire arguments.
    ///
    /// The argument count is checked before any formatter runs, so a mismatch never
    /// yields a partial encoding. `name` only labels the error.
    pub fn encode(
        &self,
        name: &str,
        args: Vec<Value>,
        defaults: &Defaults,
    ) -> EthWireResult<Vec<Value>> {
        if args.len() != self.inputs.len() {
            return Err(EthWireError::Arity {
                name: name.to_string(),
                expected: self.inputs.len(),
                got: args.len(),
            });
        }

        args.into_iter()
            .zip(&self.inputs)
            .map(|(arg, formatter)| formatter.format(arg, defaults).map_err(EthWireError::from))
            .collect()
    }

    /// Decodes a wire result. Without an output formatter this is the identity.
    pub fn decode(&self, result: Value) -> Result<Value, DecodeError> {
        match self.output {
            Some(format) => format(result),
            None => Ok(result),
        }
    }
}
