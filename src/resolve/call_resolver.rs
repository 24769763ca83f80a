use super::ArgShape;
use serde_json::Value;

/// Picks the wire method name for a logical operation.
///
/// Resolution is a pure function of the arguments and never fails: any shape that is not
/// an identifier falls back to the by-number variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallResolver {
    Fixed(&'static str),
    ByBlockShape {
        by_hash: &'static str,
        by_number: &'static str,
    },
}

impl CallResolver {
    pub const fn by_block_shape(by_hash: &'static str, by_number: &'static str) -> Self {
        CallResolver::ByBlockShape { by_hash, by_number }
    }

    pub fn resolve(&self, args: &[Value]) -> &'static str {
        match *self {
            CallResolver::Fixed(method) => method,
            CallResolver::ByBlockShape { by_hash, by_number } => match ArgShape::of(args.first()) {
                ArgShape::Identifier => by_hash,
                ArgShape::Number | ArgShape::Tag => by_number,
            },
        }
    }
}

impl From<&'static str> for CallResolver {
    fn from(method: &'static str) -> Self {
        CallResolver::Fixed(method)
    }
}
