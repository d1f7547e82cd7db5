//! Error types for the operator flows.

use std::path::PathBuf;
use toss_account::AccountError;
use toss_config::ConfigError;
use toss_delivery::DeliveryError;
use toss_types::TransactionHash;

/// Convenience Result type alias using the operator error.
pub type Result<T> = std::result::Result<T, OperatorError>;

/// Errors that can occur while signing or relaying game transactions.
#[derive(Debug, thiserror::Error)]
pub enum OperatorError {
	#[error("Configuration error: {0}")]
	Config(#[from] ConfigError),

	#[error("Account error: {0}")]
	Account(#[from] AccountError),

	#[error("Delivery error: {0}")]
	Delivery(#[from] DeliveryError),

	#[error("Failed to read artifact {path}: {source}")]
	Artifact {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Invalid ABI: {0}")]
	InvalidAbi(String),

	#[error("Contract call failed: {0}")]
	ContractCallFailed(String),

	#[error("Failed to build transaction: {0}")]
	Transaction(String),

	#[error("Transaction {hash} reverted in block {block_number}")]
	TransactionReverted {
		hash: TransactionHash,
		block_number: u64,
	},
}
