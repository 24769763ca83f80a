use crate::constants::HASH_PREFIX;
use serde_json::Value;

/// Classification of the first argument of a shape-dispatched operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgShape {
    /// A `0x`-prefixed string: an opaque identifier such as a block hash.
    Identifier,
    /// A JSON number or a decimal digit string.
    Number,
    /// Anything else, including symbolic tags, empty strings and a missing argument.
    Tag,
}

impl ArgShape {
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) if s.starts_with(HASH_PREFIX) => ArgShape::Identifier,
            Some(Value::String(s)) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                ArgShape::Number
            }
            Some(Value::Number(_)) => ArgShape::Number,
            _ => ArgShape::Tag,
        }
    }
}
