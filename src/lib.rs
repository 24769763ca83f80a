//! Call resolution and subscription state for Ethereum JSON-RPC clients.
//!
//! This crate is transport-agnostic: it turns a logical operation name plus caller
//! arguments into a [`method::WireRequest`], decodes wire results, and models the
//! per-subscription notification handling (including the debounced syncing state
//! machine) without owning any I/O or timers. Runtime concerns live in the
//! `ethwire-client` extension crate.

pub mod constants;
pub mod context;
pub mod error;
pub mod format;
pub mod method;
pub mod resolve;
pub mod subscription;
pub mod utils;

pub use alloy_primitives::{Address, U256};
pub use error::*;
