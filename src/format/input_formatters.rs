//! Argument formatters applied positionally by [`super::FormatterPipeline::encode`].
//!
//! Every function here has the [`super::InputFormatFn`] signature so descriptors can
//! reference them directly.

use super::block_ref::BlockRef;
use super::hex_quantity::{
    is_hex_strict, parse_address, parse_quantity, to_hex_quantity, to_wire_address, utf8_to_hex,
};
use crate::FormatError;
use crate::context::Defaults;
use serde_json::{Map, Value};

const TX_QUANTITY_FIELDS: [&str; 8] = [
    "gasPrice",
    "gas",
    "value",
    "maxPriorityFeePerGas",
    "maxFeePerGas",
    "nonce",
    "chainId",
    "type",
];

fn unexpected(expected: &'static str, got: &Value) -> FormatError {
    FormatError::UnexpectedType {
        expected,
        got: got.to_string(),
    }
}

fn address_str(raw: &str) -> Result<Value, FormatError> {
    parse_address(raw).map(|address| Value::String(to_wire_address(&address)))
}

/// Validates an address and emits its lowercase wire form.
pub fn address(value: Value, _defaults: &Defaults) -> Result<Value, FormatError> {
    match &value {
        Value::String(raw) => address_str(raw),
        other => Err(FormatError::InvalidAddress(other.to_string())),
    }
}

/// Block tags, hashes and hex quantities pass through (hex lowercased); numbers and
/// decimal strings become hex quantities. `null` stays `null`.
pub fn block_number(value: Value, _defaults: &Defaults) -> Result<Value, FormatError> {
    match &value {
        Value::Null => Ok(Value::Null),
        Value::String(s) if is_hex_strict(s) => Ok(Value::String(s.to_lowercase())),
        _ => BlockRef::from_value(&value).map(|block| block.to_wire()),
    }
}

/// Same as [`block_number`], substituting the default block when the caller omitted
/// the argument.
pub fn default_block_number(value: Value, defaults: &Defaults) -> Result<Value, FormatError> {
    match value {
        Value::Null => Ok(defaults.default_block().to_wire()),
        value => block_number(value, defaults),
    }
}

pub fn number_to_hex(value: Value, _defaults: &Defaults) -> Result<Value, FormatError> {
    parse_quantity(&value)
        .map(|quantity| Value::String(to_hex_quantity(quantity)))
        .ok_or_else(|| FormatError::InvalidQuantity(value.to_string()))
}

pub fn boolean(value: Value, _defaults: &Defaults) -> Result<Value, FormatError> {
    let flag = match &value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    };
    Ok(Value::Bool(flag))
}

/// Transaction object for `eth_sendTransaction` / `eth_signTransaction`. A sender is
/// required, falling back to the default account.
pub fn transaction(value: Value, defaults: &Defaults) -> Result<Value, FormatError> {
    tx_input(value, defaults, true)
}

/// Call object for `eth_call` / `eth_estimateGas`. The sender is optional.
pub fn call(value: Value, defaults: &Defaults) -> Result<Value, FormatError> {
    tx_input(value, defaults, false)
}

fn tx_input(value: Value, defaults: &Defaults, require_from: bool) -> Result<Value, FormatError> {
    let mut tx = match value {
        Value::Object(tx) => tx,
        other => return Err(unexpected("transaction object", &other)),
    };

    let from = match tx.remove("from") {
        None | Some(Value::Null) => defaults
            .default_account()
            .map(|account| Value::String(to_wire_address(account))),
        Some(Value::String(raw)) => Some(address_str(&raw)?),
        Some(other) => return Err(FormatError::InvalidAddress(other.to_string())),
    };
    match from {
        Some(from) => {
            tx.insert("from".to_string(), from);
        }
        None if require_from => return Err(FormatError::MissingFrom),
        None => {}
    }

    match tx.remove("to") {
        None | Some(Value::Null) => {}
        Some(Value::String(raw)) => {
            tx.insert("to".to_string(), address_str(&raw)?);
        }
        Some(other) => return Err(FormatError::InvalidAddress(other.to_string())),
    }

    let data = take_present(&mut tx, "data");
    let input = take_present(&mut tx, "input");
    let data = match (data, input) {
        (Some(data), Some(input)) if data == input => Some(data),
        (Some(_), Some(_)) => return Err(FormatError::ConflictingData),
        (Some(data), None) | (None, Some(data)) => Some(data),
        (None, None) => None,
    };
    if let Some(data) = data {
        match &data {
            Value::String(s) if is_hex_strict(s) => {
                tx.insert("data".to_string(), data);
            }
            other => return Err(FormatError::InvalidHex(other.to_string())),
        }
    }

    if !tx.contains_key("gas") {
        if let Some(gas_limit) = take_present(&mut tx, "gasLimit") {
            tx.insert("gas".to_string(), gas_limit);
        }
    }
    tx.remove("gasLimit");

    for field in TX_QUANTITY_FIELDS {
        if let Some(quantity) = take_present(&mut tx, field) {
            tx.insert(field.to_string(), number_to_hex(quantity, defaults)?);
        }
    }

    Ok(Value::Object(tx))
}

fn take_present(map: &mut Map<String, Value>, key: &str) -> Option<Value> {
    map.remove(key).filter(|value| !value.is_null())
}

/// Message to sign: hex strings are sent as is, anything else is UTF-8 hex encoded.
pub fn sign_data(value: Value, _defaults: &Defaults) -> Result<Value, FormatError> {
    match value {
        Value::String(s) if is_hex_strict(&s) => Ok(Value::String(s)),
        Value::String(s) => Ok(Value::String(utf8_to_hex(&s))),
        other => Err(unexpected("string", &other)),
    }
}

/// Log filter for `eth_getLogs` and the `logs` subscription.
pub fn log_filter(value: Value, defaults: &Defaults) -> Result<Value, FormatError> {
    let mut filter = match value {
        Value::Null => Map::new(),
        Value::Object(filter) => filter,
        other => return Err(unexpected("log filter object", &other)),
    };

    for key in ["fromBlock", "toBlock"] {
        if let Some(block) = filter.get_mut(key) {
            *block = block_number(block.take(), defaults)?;
        }
    }

    if let Some(topics) = filter.get_mut("topics") {
        *topics = topic(topics.take())?;
    }

    if let Some(addresses) = filter.get_mut("address") {
        *addresses = match addresses.take() {
            Value::Null => Value::Null,
            Value::String(raw) => address_str(&raw)?,
            Value::Array(list) => Value::Array(
                list.into_iter()
                    .map(|entry| address(entry, defaults))
                    .collect::<Result<_, _>>()?,
            ),
            other => return Err(FormatError::InvalidAddress(other.to_string())),
        };
    }

    Ok(Value::Object(filter))
}

fn topic(value: Value) -> Result<Value, FormatError> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::String(s) if s.starts_with(crate::constants::HASH_PREFIX) => Ok(Value::String(s)),
        Value::String(s) => Ok(Value::String(utf8_to_hex(&s))),
        Value::Array(list) => Ok(Value::Array(
            list.into_iter().map(topic).collect::<Result<_, _>>()?,
        )),
        other => Err(unexpected("topic", &other)),
    }
}

/// Storage slots for `eth_getProof`.
pub fn storage_keys(value: Value, defaults: &Defaults) -> Result<Value, FormatError> {
    match value {
        Value::Array(keys) => Ok(Value::Array(
            keys.into_iter()
                .map(|key| number_to_hex(key, defaults))
                .collect::<Result<_, _>>()?,
        )),
        other => Err(unexpected("array of storage keys", &other)),
    }
}
