//! Game messages, user signatures and contract call parameters.
//!
//! The `*Message` types are the EIP-712 structs a user signs. The `*Params`
//! types mirror the tuples `depositTokenWithPermit` and
//! `tossCoinWithSignature` take on-chain, field for field.

use crate::eip712::{Eip712AbiEncoder, PERMIT_TYPE, TOSS_COIN_TYPE};
use alloy_primitives::{keccak256, Address, Signature, B256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ERC-2612 `Permit` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermitMessage {
	pub owner: Address,
	pub spender: Address,
	pub value: U256,
	pub nonce: U256,
	pub deadline: U256,
}

impl PermitMessage {
	/// keccak256(abi.encode(PERMIT_TYPEHASH, owner, spender, value, nonce, deadline))
	pub fn struct_hash(&self) -> B256 {
		let mut enc = Eip712AbiEncoder::new();
		enc.push_b256(&keccak256(PERMIT_TYPE.as_bytes()));
		enc.push_address(&self.owner);
		enc.push_address(&self.spender);
		enc.push_u256(self.value);
		enc.push_u256(self.nonce);
		enc.push_u256(self.deadline);
		keccak256(enc.finish())
	}
}

/// `TossCoin` message signed by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TossCoinMessage {
	pub user: Address,
	pub token: Address,
	pub token_amount: U256,
	pub token_price: U256,
	pub nonce: U256,
	pub deadline: U256,
	pub toss_result: bool,
}

impl TossCoinMessage {
	/// keccak256(abi.encode(TOSS_TYPEHASH, user, token, tokenAmount, tokenPrice, nonce, deadline, tossResult))
	pub fn struct_hash(&self) -> B256 {
		let mut enc = Eip712AbiEncoder::new();
		enc.push_b256(&keccak256(TOSS_COIN_TYPE.as_bytes()));
		enc.push_address(&self.user);
		enc.push_address(&self.token);
		enc.push_u256(self.token_amount);
		enc.push_u256(self.token_price);
		enc.push_u256(self.nonce);
		enc.push_u256(self.deadline);
		enc.push_bool(self.toss_result);
		keccak256(enc.finish())
	}
}

/// Split secp256k1 signature in the form Solidity's `ecrecover` takes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSignature {
	/// Recovery id, 27 or 28.
	pub v: u8,
	pub r: B256,
	pub s: B256,
}

impl From<Signature> for UserSignature {
	fn from(sig: Signature) -> Self {
		Self {
			v: if sig.v() { 28 } else { 27 },
			r: B256::from(sig.r().to_be_bytes::<32>()),
			s: B256::from(sig.s().to_be_bytes::<32>()),
		}
	}
}

impl UserSignature {
	/// Rebuilds the alloy signature, e.g. to recover the signer.
	pub fn to_signature(&self) -> Signature {
		Signature::new(
			U256::from_be_bytes(self.r.0),
			U256::from_be_bytes(self.s.0),
			self.v == 28,
		)
	}
}

/// User permit signature together with the deadline it was signed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitSignature {
	#[serde(flatten)]
	pub signature: UserSignature,
	pub deadline: U256,
}

/// User toss signature with the deadline and game nonce it was signed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TossSignature {
	#[serde(flatten)]
	pub signature: UserSignature,
	pub deadline: U256,
	pub nonce: U256,
}

/// `depositTokenWithPermit` argument tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositParams {
	pub user: Address,
	pub token: Address,
	pub token_amount: U256,
	pub token_price: U256,
	pub deadline: U256,
	pub v: u8,
	pub r: B256,
	pub s: B256,
}

impl DepositParams {
	pub fn new(
		user: Address,
		token: Address,
		token_amount: U256,
		token_price: U256,
		permit: &PermitSignature,
	) -> Self {
		Self {
			user,
			token,
			token_amount,
			token_price,
			deadline: permit.deadline,
			v: permit.signature.v,
			r: permit.signature.r,
			s: permit.signature.s,
		}
	}
}

/// `tossCoinWithSignature` argument tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TossParams {
	pub user: Address,
	pub token: Address,
	pub token_amount: U256,
	pub token_price: U256,
	pub nonce: U256,
	pub deadline: U256,
	pub toss_result: bool,
	pub v: u8,
	pub r: B256,
	pub s: B256,
}

impl TossParams {
	pub fn new(
		user: Address,
		token: Address,
		token_amount: U256,
		token_price: U256,
		toss_result: bool,
		toss: &TossSignature,
	) -> Self {
		Self {
			user,
			token,
			token_amount,
			token_price,
			nonce: toss.nonce,
			deadline: toss.deadline,
			toss_result,
			v: toss.signature.v,
			r: toss.signature.r,
			s: toss.signature.s,
		}
	}
}

/// Side of the coin a player bets on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TossPrediction {
	Heads,
	Tails,
}

impl TossPrediction {
	/// Interprets one line of prompt input: `heads` in any case is heads,
	/// anything else is tails. Only the line terminator is stripped.
	pub fn from_answer(answer: &str) -> Self {
		if answer
			.trim_end_matches(['\r', '\n'])
			.eq_ignore_ascii_case("heads")
		{
			Self::Heads
		} else {
			Self::Tails
		}
	}

	/// Value of the `tossResult` field.
	pub fn as_toss_result(self) -> bool {
		matches!(self, Self::Heads)
	}
}

impl FromStr for TossPrediction {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"heads" => Ok(Self::Heads),
			"tails" => Ok(Self::Tails),
			other => Err(format!("Invalid prediction '{}': expected heads or tails", other)),
		}
	}
}

impl fmt::Display for TossPrediction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Heads => write!(f, "heads"),
			Self::Tails => write!(f, "tails"),
		}
	}
}
