use crate::FormatError;
use crate::format::{BlockRef, parse_address};
use alloy_primitives::Address;
use serde_json::Value;

/// Per-client defaults consulted by formatters when an argument is omitted.
///
/// A `Defaults` value is also the snapshot a call is encoded with: once a request has
/// been built, later changes to the client's defaults do not affect it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Defaults {
    default_account: Option<Address>,
    default_block: BlockRef,
}

impl Defaults {
    pub fn new(default_account: Option<Address>, default_block: BlockRef) -> Self {
        Self {
            default_account,
            default_block,
        }
    }

    pub fn default_account(&self) -> Option<&Address> {
        self.default_account.as_ref()
    }

    pub fn default_block(&self) -> BlockRef {
        self.default_block
    }

    /// Sets the default account from its textual form. An empty string unsets it.
    pub fn set_default_account(&mut self, raw: &str) -> Result<(), FormatError> {
        self.default_account = match raw.trim() {
            "" => None,
            raw => Some(parse_address(raw)?),
        };
        Ok(())
    }

    /// Sets the default block. `null`, `false` and `""` reset it to `latest`.
    pub fn set_default_block(&mut self, raw: &Value) -> Result<(), FormatError> {
        self.default_block = BlockRef::from_optional_value(raw)?.unwrap_or_default();
        Ok(())
    }
}
