//! Account management module for the toss game operator.
//!
//! This module defines the signing interface used for both the operator,
//! which pays gas for relayed transactions, and the player, whose key signs
//! the permit and toss messages.

use alloy_primitives::{Address, Signature, B256};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

pub use implementations::local::LocalWallet;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when signing operations fail.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
}

/// Trait defining the interface for account implementations.
#[async_trait]
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait AccountInterface: Send + Sync {
	/// Address derived from the account key.
	fn address(&self) -> Address;

	/// Signs a 32-byte digest as-is, without the EIP-191 message prefix.
	///
	/// This is what EIP-712 signatures need: the digest already carries
	/// the `0x1901` prefix and domain separator.
	async fn sign_hash(&self, hash: &B256) -> Result<Signature, AccountError>;

	/// Returns the underlying signer for use with Alloy's `EthereumWallet`.
	fn signer(&self) -> PrivateKeySigner;
}
