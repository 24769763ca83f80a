use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide JSON-RPC request id counter. The first id handed out is 1.
static REQUEST_ID_COUNTER: Lazy<AtomicU64> = Lazy::new(|| AtomicU64::new(1));

#[inline]
pub fn next_request_id() -> u64 {
    REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}
