//! Common types module for the toss game operator.
//!
//! This module defines the data types shared by the operator crates: relayed
//! transactions and their receipts, secrets, the EIP-712 encoding of the
//! permit and toss messages, and the parameter tuples passed to the game
//! contract.

/// Transaction types for building relayed contract calls.
pub mod account;
/// Transaction hash and receipt types returned by the delivery layer.
pub mod delivery;
/// EIP-712 domain, struct hashing and digest computation.
pub mod eip712;
/// Game messages, user signatures and contract call parameters.
pub mod game;
/// Secure string type for handling private keys.
pub mod secret_string;
/// Utility functions for amount conversion and deadlines.
pub mod utils;

pub use account::Transaction;
pub use delivery::{TransactionHash, TransactionReceipt};
pub use eip712::{
	compute_final_digest, Eip712AbiEncoder, Eip712Domain, DEFAULT_DOMAIN_VERSION, DOMAIN_TYPE,
	NAME_TOSS_GAME, PERMIT_TYPE, TOSS_COIN_TYPE,
};
pub use game::{
	DepositParams, PermitMessage, PermitSignature, TossCoinMessage, TossParams, TossPrediction,
	TossSignature, UserSignature,
};
pub use secret_string::SecretString;
pub use utils::builders::{TransactionBuilder, TransactionBuilderError};
pub use utils::{
	current_timestamp, deadline_from_now, format_token_amount, parse_token_amount, ConversionError,
};
