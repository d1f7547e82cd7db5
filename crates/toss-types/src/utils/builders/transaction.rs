//! Builder for Transaction
//!
//! Provides a fluent API for constructing contract call transactions with
//! validation of the fee settings.

use crate::account::Transaction;
use alloy_primitives::{Address, U256};

/// Builder for creating `Transaction` instances with a fluent API.
///
/// Fee fields are optional; any left unset are filled by the provider
/// when the transaction is sent.
///
/// # Examples
///
/// ```
/// use toss_types::utils::builders::TransactionBuilder;
/// use alloy_primitives::Address;
///
/// let tx = TransactionBuilder::new()
///     .to(Address::repeat_byte(0x12))
///     .data(vec![0xde, 0xad, 0xbe, 0xef])
///     .chain_id(31337)
///     .gas_limit(500_000)
///     .try_build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
	to: Option<Address>,
	data: Vec<u8>,
	chain_id: Option<u64>,
	nonce: Option<u64>,
	gas_limit: Option<u64>,
	gas_price: Option<u128>,
	max_fee_per_gas: Option<u128>,
	max_priority_fee_per_gas: Option<u128>,
}

impl Default for TransactionBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl TransactionBuilder {
	/// Creates a new `TransactionBuilder` with default values.
	pub fn new() -> Self {
		Self {
			to: None,
			data: Vec::new(),
			chain_id: None,
			nonce: None,
			gas_limit: None,
			gas_price: None,
			max_fee_per_gas: None,
			max_priority_fee_per_gas: None,
		}
	}

	/// Sets the contract being called.
	pub fn to(mut self, to: Address) -> Self {
		self.to = Some(to);
		self
	}

	/// Sets the calldata.
	pub fn data(mut self, data: Vec<u8>) -> Self {
		self.data = data;
		self
	}

	pub fn chain_id(mut self, chain_id: u64) -> Self {
		self.chain_id = Some(chain_id);
		self
	}

	pub fn nonce(mut self, nonce: u64) -> Self {
		self.nonce = Some(nonce);
		self
	}

	pub fn gas_limit(mut self, gas_limit: u64) -> Self {
		self.gas_limit = Some(gas_limit);
		self
	}

	/// Sets the legacy gas price in wei.
	pub fn gas_price(mut self, gas_price: Option<u128>) -> Self {
		self.gas_price = gas_price;
		self
	}

	/// Sets the EIP-1559 max fee per gas in wei.
	pub fn max_fee_per_gas(mut self, max_fee: Option<u128>) -> Self {
		self.max_fee_per_gas = max_fee;
		self
	}

	/// Sets the EIP-1559 priority fee per gas in wei.
	pub fn max_priority_fee_per_gas(mut self, max_priority_fee: Option<u128>) -> Self {
		self.max_priority_fee_per_gas = max_priority_fee;
		self
	}

	/// Validates the builder state and returns an error if required fields are missing.
	pub fn validate(&self) -> Result<(), TransactionBuilderError> {
		if self.to.is_none() {
			return Err(TransactionBuilderError::MissingField("to"));
		}
		if self.chain_id.is_none() {
			return Err(TransactionBuilderError::MissingField("chain_id"));
		}

		let has_eip1559 = self.max_fee_per_gas.is_some() || self.max_priority_fee_per_gas.is_some();
		if self.gas_price.is_some() && has_eip1559 {
			return Err(TransactionBuilderError::InvalidGasPricing(
				"Cannot mix legacy gas price with EIP-1559 fees".to_string(),
			));
		}

		if let (Some(max_fee), Some(priority_fee)) =
			(self.max_fee_per_gas, self.max_priority_fee_per_gas)
		{
			if priority_fee > max_fee {
				return Err(TransactionBuilderError::InvalidGasPricing(
					"Priority fee cannot exceed max fee".to_string(),
				));
			}
		}

		Ok(())
	}

	/// Tries to build the `Transaction` with the configured values.
	pub fn try_build(self) -> Result<Transaction, TransactionBuilderError> {
		self.validate()?;

		let (Some(to), Some(chain_id)) = (self.to, self.chain_id) else {
			return Err(TransactionBuilderError::MissingField("to"));
		};

		Ok(Transaction {
			to,
			data: self.data,
			value: U256::ZERO,
			chain_id,
			nonce: self.nonce,
			gas_limit: self.gas_limit,
			gas_price: self.gas_price,
			max_fee_per_gas: self.max_fee_per_gas,
			max_priority_fee_per_gas: self.max_priority_fee_per_gas,
		})
	}
}

/// Errors that can occur when building a Transaction.
#[derive(Debug, thiserror::Error)]
pub enum TransactionBuilderError {
	#[error("Missing required field: {0}")]
	MissingField(&'static str),
	#[error("Invalid gas pricing: {0}")]
	InvalidGasPricing(String),
}
