//! Conversions between decimal token amounts and raw 18-decimal integers.
//!
//! Amounts are parsed exactly; `0.00000287528` becomes `2875280000000`
//! with no floating point rounding.

use alloy_primitives::{
	utils::{format_ether, parse_ether},
	U256,
};

/// Errors returned when parsing a token amount.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
	#[error("Invalid token amount '{0}': {1}")]
	InvalidAmount(String, String),
}

/// Parses a decimal amount with up to 18 fractional digits into base units.
pub fn parse_token_amount(amount: &str) -> Result<U256, ConversionError> {
	let trimmed = amount.trim();
	if trimmed.is_empty() || trimmed.starts_with('-') {
		return Err(ConversionError::InvalidAmount(
			amount.to_string(),
			"expected a non-negative decimal number".to_string(),
		));
	}
	parse_ether(trimmed)
		.map_err(|e| ConversionError::InvalidAmount(amount.to_string(), e.to_string()))
}

/// Formats base units as a decimal amount with 18 decimals.
pub fn format_token_amount(amount: U256) -> String {
	format_ether(amount)
}
