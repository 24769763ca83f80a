use super::hex_quantity::{parse_quantity, quantity_to_u64, to_hex_quantity};
use crate::FormatError;
use alloy_primitives::U256;
use serde_json::Value;
use std::fmt;

/// Symbolic block tags understood by every node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockTag {
    #[default]
    Latest,
    Earliest,
    Pending,
    Safe,
    Finalized,
}

impl BlockTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockTag::Latest => "latest",
            BlockTag::Earliest => "earliest",
            BlockTag::Pending => "pending",
            BlockTag::Safe => "safe",
            BlockTag::Finalized => "finalized",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "latest" => Some(BlockTag::Latest),
            "earliest" => Some(BlockTag::Earliest),
            "pending" => Some(BlockTag::Pending),
            "safe" => Some(BlockTag::Safe),
            "finalized" => Some(BlockTag::Finalized),
            _ => None,
        }
    }
}

/// A block reference: a symbolic tag or a concrete block number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockRef {
    Tag(BlockTag),
    Number(u64),
}

impl Default for BlockRef {
    fn default() -> Self {
        BlockRef::Tag(BlockTag::Latest)
    }
}

impl From<BlockTag> for BlockRef {
    fn from(tag: BlockTag) -> Self {
        BlockRef::Tag(tag)
    }
}

impl From<u64> for BlockRef {
    fn from(number: u64) -> Self {
        BlockRef::Number(number)
    }
}

impl BlockRef {
    /// Parses a tag, `"genesis"`, a number, a decimal string or a hex quantity.
    pub fn from_value(value: &Value) -> Result<Self, FormatError> {
        if let Value::String(s) = value {
            if let Some(tag) = BlockTag::parse(s) {
                return Ok(BlockRef::Tag(tag));
            }
            if s == "genesis" {
                return Ok(BlockRef::Number(0));
            }
        }

        parse_quantity(value)
            .and_then(quantity_to_u64)
            .map(BlockRef::Number)
            .ok_or_else(|| FormatError::InvalidBlockRef(value.to_string()))
    }

    /// Like [`BlockRef::from_value`], but `null`, `false` and `""` mean "unset".
    pub fn from_optional_value(value: &Value) -> Result<Option<Self>, FormatError> {
        match value {
            Value::Null | Value::Bool(false) => Ok(None),
            Value::String(s) if s.is_empty() => Ok(None),
            _ => Self::from_value(value).map(Some),
        }
    }

    pub fn to_wire(&self) -> Value {
        match self {
            BlockRef::Tag(tag) => Value::String(tag.as_str().to_string()),
            BlockRef::Number(number) => Value::String(to_hex_quantity(U256::from(*number))),
        }
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockRef::Tag(tag) => f.write_str(tag.as_str()),
            BlockRef::Number(number) => write!(f, "{number}"),
        }
    }
}
