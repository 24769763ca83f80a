//! Result formatters with the [`super::OutputFormatFn`] signature.
//!
//! Every formatter passes `null` through unchanged: a missing block, transaction or
//! receipt is a valid answer from the node, not a decode failure.

use super::hex_quantity::{parse_address, parse_quantity, quantity_to_u64, strip_hex_prefix};
use crate::DecodeError;
use crate::constants::LOG_ID_HASH_LENGTH;
use alloy_primitives::{U256, hex, keccak256};
use serde_json::{Map, Value};

fn shape(expected: &'static str, got: &Value) -> DecodeError {
    DecodeError::UnexpectedShape {
        expected,
        got: got.to_string(),
    }
}

fn to_quantity(field: &str, value: &Value) -> Result<U256, DecodeError> {
    parse_quantity(value).ok_or_else(|| DecodeError::InvalidQuantity {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn to_number(field: &str, value: &Value) -> Result<Value, DecodeError> {
    let quantity = to_quantity(field, value)?;
    quantity_to_u64(quantity)
        .map(Value::from)
        .ok_or_else(|| DecodeError::QuantityOverflow(quantity.to_string()))
}

fn to_checksum(field: &str, value: &Value) -> Result<Value, DecodeError> {
    let invalid = || DecodeError::InvalidAddress {
        field: field.to_string(),
        value: value.to_string(),
    };
    let raw = value.as_str().ok_or_else(invalid)?;
    let address = parse_address(raw).map_err(|_| invalid())?;
    Ok(Value::String(address.to_checksum(None)))
}

fn map_field(
    obj: &mut Map<String, Value>,
    field: &str,
    format: fn(&str, &Value) -> Result<Value, DecodeError>,
) -> Result<(), DecodeError> {
    if let Some(value) = obj.get_mut(field) {
        if !value.is_null() {
            *value = format(field, value)?;
        }
    }
    Ok(())
}

fn number_fields(obj: &mut Map<String, Value>, fields: &[&str]) -> Result<(), DecodeError> {
    fields
        .iter()
        .try_for_each(|field| map_field(obj, field, to_number))
}

fn big_fields(obj: &mut Map<String, Value>, fields: &[&str]) -> Result<(), DecodeError> {
    fields.iter().try_for_each(|field| {
        map_field(obj, field, |field, value| {
            to_quantity(field, value).map(|quantity| Value::String(quantity.to_string()))
        })
    })
}

fn object_or_null(
    value: Value,
    expected: &'static str,
    format: impl FnOnce(&mut Map<String, Value>) -> Result<(), DecodeError>,
) -> Result<Value, DecodeError> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Object(mut obj) => {
            format(&mut obj)?;
            Ok(Value::Object(obj))
        }
        other => Err(shape(expected, &other)),
    }
}

fn each(value: Value, format: fn(Value) -> Result<Value, DecodeError>) -> Result<Value, DecodeError> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Array(list) => Ok(Value::Array(
            list.into_iter().map(format).collect::<Result<_, _>>()?,
        )),
        other => Err(shape("array", &other)),
    }
}

/// Hex quantity to a JSON number. Fails when the value does not fit in 64 bits.
pub fn quantity_to_number(value: Value) -> Result<Value, DecodeError> {
    match value {
        Value::Null => Ok(Value::Null),
        value => to_number("result", &value),
    }
}

/// Hex quantity to a decimal string, keeping full 256-bit precision.
pub fn big_number(value: Value) -> Result<Value, DecodeError> {
    match value {
        Value::Null => Ok(Value::Null),
        value => to_quantity("result", &value).map(|quantity| Value::String(quantity.to_string())),
    }
}

pub fn checksum_address(value: Value) -> Result<Value, DecodeError> {
    match value {
        Value::Null => Ok(Value::Null),
        value => to_checksum("result", &value),
    }
}

pub fn checksum_addresses(value: Value) -> Result<Value, DecodeError> {
    each(value, checksum_address)
}

pub fn transaction(value: Value) -> Result<Value, DecodeError> {
    object_or_null(value, "transaction object", |tx| {
        number_fields(tx, &["blockNumber", "transactionIndex", "nonce", "gas", "type"])?;
        big_fields(
            tx,
            &["gasPrice", "value", "maxFeePerGas", "maxPriorityFeePerGas"],
        )?;
        map_field(tx, "to", to_checksum)?;
        map_field(tx, "from", to_checksum)
    })
}

pub fn transactions(value: Value) -> Result<Value, DecodeError> {
    each(value, transaction)
}

/// Block header or full block. Transaction entries that are objects are formatted as
/// transactions; hashes are left alone.
pub fn block(value: Value) -> Result<Value, DecodeError> {
    object_or_null(value, "block object", |block| {
        number_fields(
            block,
            &[
                "gasLimit",
                "gasUsed",
                "size",
                "timestamp",
                "number",
                "baseFeePerGas",
            ],
        )?;
        big_fields(block, &["difficulty", "totalDifficulty"])?;
        map_field(block, "miner", to_checksum)?;

        if let Some(Value::Array(txs)) = block.get_mut("transactions") {
            for tx in txs.iter_mut() {
                if tx.is_object() {
                    *tx = transaction(tx.take())?;
                }
            }
        }
        Ok(())
    })
}

/// Adds the `log_<8 hex>` id and converts positions to numbers.
pub fn log(value: Value) -> Result<Value, DecodeError> {
    object_or_null(value, "log object", |log| {
        if let (Some(block_hash), Some(tx_hash), Some(log_index)) = (
            log.get("blockHash").and_then(Value::as_str),
            log.get("transactionHash").and_then(Value::as_str),
            log.get("logIndex").and_then(Value::as_str),
        ) {
            let seed = [block_hash, tx_hash, log_index]
                .into_iter()
                .map(|part| strip_hex_prefix(part).unwrap_or(part))
                .collect::<String>();
            let digest = hex::encode(keccak256(seed.as_bytes()));
            log.insert(
                "id".to_string(),
                Value::String(format!("log_{}", &digest[..LOG_ID_HASH_LENGTH])),
            );
        }

        number_fields(log, &["blockNumber", "transactionIndex", "logIndex"])?;
        map_field(log, "address", to_checksum)
    })
}

pub fn logs(value: Value) -> Result<Value, DecodeError> {
    each(value, log)
}

pub fn receipt(value: Value) -> Result<Value, DecodeError> {
    object_or_null(value, "receipt object", |receipt| {
        number_fields(
            receipt,
            &[
                "blockNumber",
                "transactionIndex",
                "cumulativeGasUsed",
                "gasUsed",
                "effectiveGasPrice",
            ],
        )?;
        if let Some(entries) = receipt.get_mut("logs") {
            *entries = logs(entries.take())?;
        }
        map_field(receipt, "contractAddress", to_checksum)?;
        map_field(receipt, "status", |field, status| {
            to_quantity(field, status).map(|status| Value::Bool(!status.is_zero()))
        })
    })
}

/// Syncing status from `eth_syncing` or a `syncing` notification.
///
/// Accepts `false`, `{"syncing": false}`, `{"syncing": true, "status": {..}}` or a bare
/// status object, and yields `false` or the status object with numeric fields.
pub fn syncing(value: Value) -> Result<Value, DecodeError> {
    match value {
        Value::Null | Value::Bool(_) => Ok(value),
        Value::Object(mut obj) => {
            match obj.get("syncing").cloned() {
                Some(Value::Bool(false)) => return Ok(Value::Bool(false)),
                Some(_) => {
                    if let Some(Value::Object(status)) = obj.remove("status") {
                        obj = status;
                    }
                }
                None => {}
            }
            number_fields(
                &mut obj,
                &[
                    "startingBlock",
                    "currentBlock",
                    "highestBlock",
                    "knownStates",
                    "pulledStates",
                ],
            )?;
            Ok(Value::Object(obj))
        }
        other => Err(shape("syncing status", &other)),
    }
}

pub fn fee_history(value: Value) -> Result<Value, DecodeError> {
    object_or_null(value, "fee history object", |history| {
        number_fields(history, &["oldestBlock"])?;
        if let Some(fees) = history.get_mut("baseFeePerGas") {
            *fees = each(fees.take(), big_number)?;
        }
        if let Some(Value::Array(rewards)) = history.get_mut("reward") {
            for reward in rewards.iter_mut() {
                *reward = each(reward.take(), big_number)?;
            }
        }
        Ok(())
    })
}
