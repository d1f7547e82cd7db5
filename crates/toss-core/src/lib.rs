//! Core flows of the toss game operator.
//!
//! The operator signs ERC-2612 permits and `TossCoin` messages with the
//! player's key, then relays `depositTokenWithPermit` and
//! `tossCoinWithSignature` calls to the game from its own account and waits
//! for the receipts.

pub mod contracts;
pub mod error;
pub mod operator;
pub mod signing;

#[cfg(test)]
mod test_support;

pub use contracts::{parse_abi, Contract};
pub use error::{OperatorError, Result};
pub use operator::{
	DepositAndTossReceipts, FlowStep, OperatorCallback, OperatorEvent, OperatorSettings,
	TossGameOperator, DEPOSIT_METHOD, TOSS_METHOD,
};
pub use signing::{sign_digest, DomainReport};
