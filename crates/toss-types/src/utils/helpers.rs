//! Time helpers for signature deadlines.

use alloy_primitives::U256;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix timestamp in seconds.
pub fn current_timestamp() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_secs())
		.unwrap_or(0)
}

/// Deadline `seconds` from now, as the `uint256` the contracts compare
/// against `block.timestamp`.
pub fn deadline_from_now(seconds: u64) -> U256 {
	U256::from(current_timestamp().saturating_add(seconds))
}
