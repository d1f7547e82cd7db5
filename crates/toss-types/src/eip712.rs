//! EIP-712 utilities for the permit and toss messages.
//!
//! These helpers provide:
//! - Domain separator computation (name, version, chainId, verifyingContract)
//! - Struct hashes for `Permit` (ERC-2612) and `TossCoin`
//! - Final digest computation (0x1901 || domainSeparator || structHash)
//! - A minimal ABI encoder for the static field types those structs use
//!
//! Every word is laid out the way Solidity's `abi.encode` does it, so the
//! results match what the token and game contracts compute on-chain.

use alloy_primitives::{keccak256, Address, B256, U256};
use serde::{Deserialize, Serialize};

pub const DOMAIN_TYPE: &str =
	"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";
pub const PERMIT_TYPE: &str =
	"Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)";
pub const TOSS_COIN_TYPE: &str = "TossCoin(address user,address token,uint256 tokenAmount,uint256 tokenPrice,uint256 nonce,uint256 deadline,bool tossResult)";

/// Domain name used by the TossGame contract.
pub const NAME_TOSS_GAME: &str = "TossGame";
/// Domain version used by both the token and the game.
pub const DEFAULT_DOMAIN_VERSION: &str = "1";

/// EIP-712 domain of a verifying contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eip712Domain {
	pub name: String,
	pub version: String,
	#[serde(rename = "chainId")]
	pub chain_id: u64,
	#[serde(rename = "verifyingContract")]
	pub verifying_contract: Address,
}

impl Eip712Domain {
	pub fn new(
		name: impl Into<String>,
		version: impl Into<String>,
		chain_id: u64,
		verifying_contract: Address,
	) -> Self {
		Self {
			name: name.into(),
			version: version.into(),
			chain_id,
			verifying_contract,
		}
	}

	pub fn type_hash() -> B256 {
		keccak256(DOMAIN_TYPE.as_bytes())
	}

	pub fn name_hash(&self) -> B256 {
		keccak256(self.name.as_bytes())
	}

	pub fn version_hash(&self) -> B256 {
		keccak256(self.version.as_bytes())
	}

	/// Computes keccak256(abi.encode(typeHash, keccak256(name), keccak256(version), chainId, verifyingContract)).
	pub fn separator(&self) -> B256 {
		let mut enc = Eip712AbiEncoder::new();
		enc.push_b256(&Self::type_hash());
		enc.push_b256(&self.name_hash());
		enc.push_b256(&self.version_hash());
		enc.push_u256(U256::from(self.chain_id));
		enc.push_address(&self.verifying_contract);
		keccak256(enc.finish())
	}
}

/// Compute the final EIP-712 digest: keccak256(0x1901 || domainSeparator || structHash).
pub fn compute_final_digest(domain_separator: &B256, struct_hash: &B256) -> B256 {
	let mut out = Vec::with_capacity(2 + 32 + 32);
	out.push(0x19);
	out.push(0x01);
	out.extend_from_slice(domain_separator.as_slice());
	out.extend_from_slice(struct_hash.as_slice());
	keccak256(out)
}

/// Minimal ABI encoder for static types used in EIP-712 struct hashing.
pub struct Eip712AbiEncoder {
	buf: Vec<u8>,
}

impl Default for Eip712AbiEncoder {
	fn default() -> Self {
		Self::new()
	}
}

impl Eip712AbiEncoder {
	pub fn new() -> Self {
		Self { buf: Vec::new() }
	}

	pub fn push_b256(&mut self, v: &B256) {
		self.buf.extend_from_slice(v.as_slice());
	}

	pub fn push_address(&mut self, addr: &Address) {
		let mut word = [0u8; 32];
		word[12..].copy_from_slice(addr.as_slice());
		self.buf.extend_from_slice(&word);
	}

	pub fn push_u256(&mut self, v: U256) {
		let word: [u8; 32] = v.to_be_bytes::<32>();
		self.buf.extend_from_slice(&word);
	}

	pub fn push_bool(&mut self, v: bool) {
		let mut word = [0u8; 32];
		word[31] = v as u8;
		self.buf.extend_from_slice(&word);
	}

	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}
