//! Mock chain shared by the signing and relay tests.

use crate::contracts::{parse_abi, Contract};
use crate::operator::{OperatorSettings, TossGameOperator};
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{address, keccak256, Address, Bytes, B256, U256};
use std::sync::{Arc, Mutex};
use toss_account::LocalWallet;
use toss_delivery::{DeliveryError, MockDeliveryInterface};
use toss_types::{Eip712Domain, Transaction, TransactionHash, TransactionReceipt};

pub const OPERATOR: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const USER: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
pub const GAME: Address = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");
pub const TOKEN: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
pub const CHAIN_ID: u64 = 31337;
pub const TOKEN_NAME: &str = "Mock Token";

const GAME_ARTIFACT: &str = include_str!("../fixtures/TossGame.json");
const TOKEN_ARTIFACT: &str = include_str!("../fixtures/MockERC20.json");

pub mod abi {
	alloy_sol_types::sol! {
		struct DepositParams {
			address user;
			address token;
			uint256 tokenAmount;
			uint256 tokenPrice;
			uint256 deadline;
			uint8 v;
			bytes32 r;
			bytes32 s;
		}

		struct TossParams {
			address user;
			address token;
			uint256 tokenAmount;
			uint256 tokenPrice;
			uint256 nonce;
			uint256 deadline;
			bool tossResult;
			uint8 v;
			bytes32 r;
			bytes32 s;
		}

		function depositTokenWithPermit(DepositParams params);
		function tossCoinWithSignature(TossParams params);
	}
}

pub fn game_contract() -> Contract {
	Contract::new("TossGame", GAME, parse_abi(GAME_ARTIFACT).unwrap())
}

pub fn token_contract() -> Contract {
	Contract::new("Token", TOKEN, parse_abi(TOKEN_ARTIFACT).unwrap())
}

pub fn user_wallet() -> LocalWallet {
	LocalWallet::new(USER).unwrap()
}

/// What the mocked chain reports.
#[derive(Debug, Clone)]
pub struct ChainState {
	pub token_nonce: U256,
	pub game_nonce: U256,
	pub operator_tx_count: u64,
	pub receipt_success: bool,
	/// `DOMAIN_SEPARATOR()` of the token; `None` returns the correct value.
	pub token_separator: Option<B256>,
}

impl Default for ChainState {
	fn default() -> Self {
		Self {
			token_nonce: U256::ZERO,
			game_nonce: U256::ZERO,
			operator_tx_count: 0,
			receipt_success: true,
			token_separator: None,
		}
	}
}

fn selector(contract: &Contract, method: &str) -> [u8; 4] {
	contract.function(method).unwrap().selector().0
}

fn encode_output(value: DynSolValue) -> Bytes {
	Bytes::from(DynSolValue::Tuple(vec![value]).abi_encode_params())
}

/// Builds a delivery mock answering the calls the operator makes.
///
/// Submitted transactions are recorded and get `keccak256(data)` as hash.
pub fn mock_delivery(state: ChainState) -> (MockDeliveryInterface, Arc<Mutex<Vec<Transaction>>>) {
	let submitted = Arc::new(Mutex::new(Vec::new()));
	let mut delivery = MockDeliveryInterface::new();

	delivery
		.expect_chain_id()
		.returning(|| Box::pin(async { Ok(CHAIN_ID) }));

	let tx_count = state.operator_tx_count;
	delivery
		.expect_get_nonce()
		.returning(move |_| Box::pin(async move { Ok(tx_count) }));

	let token = token_contract();
	let game = game_contract();
	let token_name = selector(&token, "name");
	let token_nonces = selector(&token, "nonces");
	let token_separator = selector(&token, "DOMAIN_SEPARATOR");
	let game_nonces = selector(&game, "nonces");
	let separator = state.token_separator.unwrap_or_else(|| {
		Eip712Domain::new(TOKEN_NAME, "1", CHAIN_ID, TOKEN).separator()
	});
	let (token_nonce, game_nonce) = (state.token_nonce, state.game_nonce);

	delivery.expect_eth_call().returning(move |tx| {
		let call = (tx.to, tx.selector());
		let output = if call == (TOKEN, Some(token_name)) {
			Ok(encode_output(DynSolValue::String(TOKEN_NAME.to_string())))
		} else if call == (TOKEN, Some(token_nonces)) {
			Ok(encode_output(DynSolValue::Uint(token_nonce, 256)))
		} else if call == (TOKEN, Some(token_separator)) {
			Ok(encode_output(DynSolValue::FixedBytes(separator, 32)))
		} else if call == (GAME, Some(game_nonces)) {
			Ok(encode_output(DynSolValue::Uint(game_nonce, 256)))
		} else {
			Err(DeliveryError::Network("execution reverted".to_string()))
		};
		Box::pin(async move { output })
	});

	let sink = submitted.clone();
	delivery.expect_submit().returning(move |tx| {
		let hash = TransactionHash(keccak256(&tx.data));
		sink.lock().unwrap().push(tx);
		Box::pin(async move { Ok(hash) })
	});

	let success = state.receipt_success;
	delivery.expect_wait_for_receipt().returning(move |hash| {
		let receipt = TransactionReceipt {
			hash: *hash,
			block_number: 1,
			gas_used: 21_000,
			success,
		};
		Box::pin(async move { Ok(receipt) })
	});

	(delivery, submitted)
}

/// Operator with default settings on top of [`mock_delivery`].
pub fn operator_with(state: ChainState) -> (TossGameOperator, Arc<Mutex<Vec<Transaction>>>) {
	let (delivery, submitted) = mock_delivery(state);
	let operator = TossGameOperator::new(
		Arc::new(delivery),
		Arc::new(LocalWallet::new(OPERATOR).unwrap()),
		game_contract(),
		token_contract(),
		OperatorSettings::default(),
	)
	.unwrap();
	(operator, submitted)
}
