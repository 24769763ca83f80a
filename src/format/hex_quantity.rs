use crate::FormatError;
use crate::constants::{ADDRESS_HEX_LENGTH, HASH_PREFIX};
use alloy_primitives::{Address, U256, hex};
use serde_json::Value;
use std::str::FromStr;

/// Strips a `0x` (or `0X`) prefix, returning `None` when the prefix is absent.
pub fn strip_hex_prefix(s: &str) -> Option<&str> {
    s.strip_prefix(HASH_PREFIX).or_else(|| s.strip_prefix("0X"))
}

/// `0x` followed by zero or more hex digits.
pub fn is_hex_strict(s: &str) -> bool {
    strip_hex_prefix(s).is_some_and(|body| body.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Parses a JSON quantity: an unsigned integer, a decimal digit string or a hex string.
pub fn parse_quantity(value: &Value) -> Option<U256> {
    match value {
        Value::Number(n) => n.as_u64().map(U256::from),
        Value::String(s) => parse_quantity_str(s.trim()),
        _ => None,
    }
}

fn parse_quantity_str(s: &str) -> Option<U256> {
    match strip_hex_prefix(s) {
        Some("") => Some(U256::ZERO),
        Some(body) => U256::from_str_radix(body, 16).ok(),
        None if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            U256::from_str_radix(s, 10).ok()
        }
        None => None,
    }
}

pub fn quantity_to_u64(value: U256) -> Option<u64> {
    if value > U256::from(u64::MAX) {
        None
    } else {
        Some(value.as_limbs()[0])
    }
}

pub fn to_hex_quantity(value: U256) -> String {
    format!("{HASH_PREFIX}{value:x}")
}

pub fn utf8_to_hex(s: &str) -> String {
    format!("{HASH_PREFIX}{}", hex::encode(s.as_bytes()))
}

/// Parses an address given with or without the `0x` prefix.
///
/// All-lowercase and all-uppercase bodies are accepted as is; a mixed-case body must
/// carry a valid EIP-55 checksum.
pub fn parse_address(raw: &str) -> Result<Address, FormatError> {
    let body = strip_hex_prefix(raw).unwrap_or(raw);
    if body.len() != ADDRESS_HEX_LENGTH || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(FormatError::InvalidAddress(raw.to_string()));
    }

    let address =
        Address::from_str(body).map_err(|_| FormatError::InvalidAddress(raw.to_string()))?;

    let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
    let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
    if has_upper && has_lower {
        let checksummed = address.to_checksum(None);
        if checksummed[HASH_PREFIX.len()..] != *body {
            return Err(FormatError::InvalidChecksum(raw.to_string()));
        }
    }

    Ok(address)
}

/// Wire form of an address: lowercase with the `0x` prefix.
pub fn to_wire_address(address: &Address) -> String {
    address.to_checksum(None).to_lowercase()
}
