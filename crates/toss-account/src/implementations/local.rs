//! Local private-key account.

use crate::{AccountError, AccountInterface};
use alloy_primitives::{Address, Signature, B256};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use toss_types::SecretString;

/// Local wallet implementation using Alloy's signer.
///
/// Keeps the private key in memory and signs digests locally.
#[derive(Debug, Clone)]
pub struct LocalWallet {
	/// The underlying Alloy signer that handles cryptographic operations.
	signer: PrivateKeySigner,
}

impl LocalWallet {
	/// Creates a new LocalWallet from a hex-encoded private key.
	///
	/// The private key should be provided as a hex string (with or without 0x prefix).
	pub fn new(private_key_hex: &str) -> Result<Self, AccountError> {
		let signer = private_key_hex
			.trim()
			.parse::<PrivateKeySigner>()
			.map_err(|e| AccountError::InvalidKey(format!("Invalid private key: {}", e)))?;

		Ok(Self { signer })
	}

	/// Creates a LocalWallet from a key held in a `SecretString`.
	pub fn from_secret(private_key: &SecretString) -> Result<Self, AccountError> {
		private_key.with_exposed(Self::new)
	}
}

#[async_trait]
impl AccountInterface for LocalWallet {
	fn address(&self) -> Address {
		self.signer.address()
	}

	async fn sign_hash(&self, hash: &B256) -> Result<Signature, AccountError> {
		self.signer
			.sign_hash(hash)
			.await
			.map_err(|e| AccountError::SigningFailed(format!("Failed to sign hash: {}", e)))
	}

	fn signer(&self) -> PrivateKeySigner {
		self.signer.clone()
	}
}
