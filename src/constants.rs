/// Prefix that marks an opaque identifier (block or transaction hash) or a hex quantity.
pub const HASH_PREFIX: &str = "0x";

/// JSON-RPC protocol version sent in every request envelope.
pub const JSON_RPC_VERSION: &str = "2.0";

/// Default quiet period before a syncing subscription reports that syncing stopped.
pub const DEFAULT_SYNC_DEBOUNCE_MS: u64 = 500;

/// Default distance (in blocks) from the highest known block under which a node is
/// considered to be at the chain tip.
pub const DEFAULT_SYNC_TIP_THRESHOLD: u64 = 200;

/// Length of the hex body of an address (20 bytes).
pub const ADDRESS_HEX_LENGTH: usize = 40;

/// Number of hex characters of the keccak digest kept in a log id.
pub const LOG_ID_HASH_LENGTH: usize = 8;
