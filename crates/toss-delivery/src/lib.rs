//! Transaction delivery module for the toss game operator.
//!
//! This module handles the chain reads the operator needs (chain id, account
//! nonces, contract calls) as well as submitting signed transactions and
//! waiting for their receipts.

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use thiserror::Error;
use toss_types::{Transaction, TransactionHash, TransactionReceipt};

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
}

pub use implementations::evm::alloy::AlloyDelivery;

/// Errors that can occur during transaction delivery operations.
#[derive(Debug, Error)]
pub enum DeliveryError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// The transaction was not mined within the configured window.
	#[error("Timed out after {seconds}s waiting for receipt of {hash}")]
	ReceiptTimeout { hash: TransactionHash, seconds: u64 },
}

/// Trait defining the interface for transaction delivery implementations.
///
/// Transactions are signed by the operator key the implementation was
/// created with.
#[async_trait]
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait DeliveryInterface: Send + Sync {
	/// Chain id reported by the RPC endpoint.
	async fn chain_id(&self) -> Result<u64, DeliveryError>;

	/// Gets the current transaction count for an address.
	///
	/// Returns the next valid nonce for transaction submission.
	async fn get_nonce(&self, address: Address) -> Result<u64, DeliveryError>;

	/// Executes a contract call without sending a transaction.
	async fn eth_call(&self, tx: Transaction) -> Result<Bytes, DeliveryError>;

	/// Signs and broadcasts a transaction, returning its hash.
	async fn submit(&self, tx: Transaction) -> Result<TransactionHash, DeliveryError>;

	/// Blocks until the transaction is mined and returns its receipt.
	///
	/// A mined transaction that reverted is still returned here, with
	/// `success` set to false.
	async fn wait_for_receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<TransactionReceipt, DeliveryError>;
}
