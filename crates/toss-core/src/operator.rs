//! Relay flows of the toss game operator.
//!
//! The operator holds the RPC client, its own account and the game and token
//! contract handles. It submits user-signed deposits and tosses to the game,
//! paying gas itself, and waits for each transaction to be mined before
//! returning.

use crate::contracts::Contract;
use crate::error::{OperatorError, Result};
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, U256};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use toss_account::{AccountInterface, LocalWallet};
use toss_config::Config;
use toss_delivery::{AlloyDelivery, DeliveryInterface};
use toss_types::{
	deadline_from_now, DepositParams, PermitSignature, TossParams, TossSignature,
	TransactionBuilder, TransactionReceipt, DEFAULT_DOMAIN_VERSION, NAME_TOSS_GAME,
};
use tracing::{error, info, instrument};

pub const DEPOSIT_METHOD: &str = "depositTokenWithPermit";
pub const TOSS_METHOD: &str = "tossCoinWithSignature";

/// Transaction and signing settings of the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorSettings {
	pub gas_limit: u64,
	pub gas_price: Option<u128>,
	pub max_fee_per_gas: Option<u128>,
	pub max_priority_fee_per_gas: Option<u128>,
	/// Validity window of user signatures, in seconds.
	pub deadline_seconds: u64,
	/// EIP-712 domain name of the game.
	pub game_domain_name: String,
	/// EIP-712 domain version of the game.
	pub domain_version: String,
	/// EIP-712 domain version of the token.
	pub token_domain_version: String,
}

impl Default for OperatorSettings {
	fn default() -> Self {
		Self {
			gas_limit: 500_000,
			gas_price: None,
			max_fee_per_gas: None,
			max_priority_fee_per_gas: None,
			deadline_seconds: 3600,
			game_domain_name: NAME_TOSS_GAME.to_string(),
			domain_version: DEFAULT_DOMAIN_VERSION.to_string(),
			token_domain_version: DEFAULT_DOMAIN_VERSION.to_string(),
		}
	}
}

impl From<&Config> for OperatorSettings {
	fn from(config: &Config) -> Self {
		Self {
			gas_limit: config.gas.gas_limit,
			gas_price: config.gas.gas_price.map(u128::from),
			max_fee_per_gas: config.gas.max_fee_per_gas.map(u128::from),
			max_priority_fee_per_gas: config.gas.max_priority_fee_per_gas.map(u128::from),
			deadline_seconds: config.game.deadline_seconds,
			game_domain_name: config.game.domain_name.clone(),
			domain_version: config.game.domain_version.clone(),
			token_domain_version: config.game.token_domain_version.clone(),
		}
	}
}

/// Game transaction a flow step relays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
	Deposit,
	Toss,
}

impl fmt::Display for FlowStep {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Deposit => write!(f, "deposit"),
			Self::Toss => write!(f, "toss"),
		}
	}
}

/// Progress events emitted while relaying.
#[derive(Debug, Clone)]
pub enum OperatorEvent {
	/// The transaction is about to be submitted.
	Submitting { step: FlowStep },
	/// The transaction was mined successfully.
	Confirmed {
		step: FlowStep,
		receipt: TransactionReceipt,
	},
}

/// Callback for operator progress events
pub type OperatorCallback = Box<dyn Fn(&OperatorEvent) + Send + Sync>;

/// Receipts of a combined deposit and toss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositAndTossReceipts {
	pub deposit: TransactionReceipt,
	pub toss: TransactionReceipt,
}

/// Relays user-signed game actions on-chain.
pub struct TossGameOperator {
	pub(crate) delivery: Arc<dyn DeliveryInterface>,
	operator: Arc<dyn AccountInterface>,
	pub(crate) game: Contract,
	pub(crate) token: Contract,
	pub(crate) settings: OperatorSettings,
	callback: Option<OperatorCallback>,
}

impl TossGameOperator {
	/// Creates an operator from its parts.
	///
	/// # Errors
	/// Returns `OperatorError::InvalidAbi` if either ABI lacks a function the
	/// flows call
	pub fn new(
		delivery: Arc<dyn DeliveryInterface>,
		operator: Arc<dyn AccountInterface>,
		game: Contract,
		token: Contract,
		settings: OperatorSettings,
	) -> Result<Self> {
		game.require_functions(&[DEPOSIT_METHOD, TOSS_METHOD, "nonces"])?;
		token.require_functions(&["name", "nonces"])?;

		Ok(Self {
			delivery,
			operator,
			game,
			token,
			settings,
			callback: None,
		})
	}

	/// Builds the operator from configuration: connects to the RPC endpoint
	/// with the operator key and loads both ABI artifacts.
	pub async fn from_config(config: &Config) -> Result<Self> {
		let operator = LocalWallet::from_secret(&config.accounts.operator_key)?;
		let delivery = AlloyDelivery::new(
			&config.network.rpc_url,
			operator.signer(),
			Duration::from_secs(config.network.receipt_timeout_seconds),
		)?;

		let game = Contract::from_artifact(
			"TossGame",
			config.contracts.game_address,
			&config.contracts.game_artifact,
		)
		.await?;
		let token = Contract::from_artifact(
			"Token",
			config.contracts.token_address,
			&config.contracts.token_artifact,
		)
		.await?;

		info!(
			operator = %operator.address(),
			game = %game.address(),
			token = %token.address(),
			rpc_url = %config.network.rpc_url,
			"Operator initialized"
		);

		Self::new(
			Arc::new(delivery),
			Arc::new(operator),
			game,
			token,
			OperatorSettings::from(config),
		)
	}

	/// Registers a callback for progress events.
	pub fn with_callback(mut self, callback: OperatorCallback) -> Self {
		self.callback = Some(callback);
		self
	}

	pub fn operator_address(&self) -> Address {
		self.operator.address()
	}

	fn emit(&self, event: OperatorEvent) {
		if let Some(callback) = &self.callback {
			callback(&event);
		}
	}

	/// Deadline for a signature created now.
	pub fn deadline(&self) -> U256 {
		deadline_from_now(self.settings.deadline_seconds)
	}

	/// Encodes `depositTokenWithPermit(params)`.
	pub fn encode_deposit_call(&self, params: &DepositParams) -> Result<Bytes> {
		let tuple = DynSolValue::Tuple(vec![
			DynSolValue::Address(params.user),
			DynSolValue::Address(params.token),
			DynSolValue::Uint(params.token_amount, 256),
			DynSolValue::Uint(params.token_price, 256),
			DynSolValue::Uint(params.deadline, 256),
			DynSolValue::Uint(U256::from(params.v), 8),
			DynSolValue::FixedBytes(params.r, 32),
			DynSolValue::FixedBytes(params.s, 32),
		]);
		self.game.encode(DEPOSIT_METHOD, &[tuple])
	}

	/// Encodes `tossCoinWithSignature(params)`.
	pub fn encode_toss_call(&self, params: &TossParams) -> Result<Bytes> {
		let tuple = DynSolValue::Tuple(vec![
			DynSolValue::Address(params.user),
			DynSolValue::Address(params.token),
			DynSolValue::Uint(params.token_amount, 256),
			DynSolValue::Uint(params.token_price, 256),
			DynSolValue::Uint(params.nonce, 256),
			DynSolValue::Uint(params.deadline, 256),
			DynSolValue::Bool(params.toss_result),
			DynSolValue::Uint(U256::from(params.v), 8),
			DynSolValue::FixedBytes(params.r, 32),
			DynSolValue::FixedBytes(params.s, 32),
		]);
		self.game.encode(TOSS_METHOD, &[tuple])
	}

	/// Relays a permit-backed deposit on behalf of `user_address`.
	#[instrument(skip_all, fields(user = %user_address, amount = %amount))]
	pub async fn deposit_with_permit(
		&self,
		user_address: Address,
		amount: U256,
		token_price: U256,
		permit: &PermitSignature,
	) -> Result<TransactionReceipt> {
		let params = DepositParams::new(
			user_address,
			self.token.address(),
			amount,
			token_price,
			permit,
		);
		let calldata = self.encode_deposit_call(&params)?;

		self.emit(OperatorEvent::Submitting {
			step: FlowStep::Deposit,
		});
		let receipt = self.relay(DEPOSIT_METHOD, calldata).await?;
		self.emit(OperatorEvent::Confirmed {
			step: FlowStep::Deposit,
			receipt: receipt.clone(),
		});
		Ok(receipt)
	}

	/// Relays a signed toss on behalf of `user_address`.
	#[instrument(skip_all, fields(user = %user_address, amount = %amount, toss_result = toss_result))]
	pub async fn toss_coin(
		&self,
		user_address: Address,
		amount: U256,
		token_price: U256,
		toss_result: bool,
		toss: &TossSignature,
	) -> Result<TransactionReceipt> {
		let params = TossParams::new(
			user_address,
			self.token.address(),
			amount,
			token_price,
			toss_result,
			toss,
		);
		let calldata = self.encode_toss_call(&params)?;

		self.emit(OperatorEvent::Submitting {
			step: FlowStep::Toss,
		});
		let receipt = self.relay(TOSS_METHOD, calldata).await?;
		self.emit(OperatorEvent::Confirmed {
			step: FlowStep::Toss,
			receipt: receipt.clone(),
		});
		Ok(receipt)
	}

	/// Sends calldata to the game from the operator account and waits for
	/// the receipt.
	#[instrument(skip(self, calldata), fields(calldata_len = calldata.len()))]
	async fn relay(&self, method: &str, calldata: Bytes) -> Result<TransactionReceipt> {
		let chain_id = self.delivery.chain_id().await?;
		let nonce = self.delivery.get_nonce(self.operator.address()).await?;

		let tx = TransactionBuilder::new()
			.to(self.game.address())
			.data(calldata.to_vec())
			.chain_id(chain_id)
			.nonce(nonce)
			.gas_limit(self.settings.gas_limit)
			.gas_price(self.settings.gas_price)
			.max_fee_per_gas(self.settings.max_fee_per_gas)
			.max_priority_fee_per_gas(self.settings.max_priority_fee_per_gas)
			.try_build()
			.map_err(|e| OperatorError::Transaction(e.to_string()))?;

		let hash = self.delivery.submit(tx).await?;
		info!(tx_hash = %hash, nonce, "Submitted {}", method);

		let receipt = self.delivery.wait_for_receipt(&hash).await?;
		if !receipt.success {
			error!(
				tx_hash = %receipt.hash,
				block_number = receipt.block_number,
				"{} reverted",
				method
			);
			return Err(OperatorError::TransactionReverted {
				hash: receipt.hash,
				block_number: receipt.block_number,
			});
		}

		info!(
			tx_hash = %receipt.hash,
			block_number = receipt.block_number,
			gas_used = receipt.gas_used,
			"{} mined",
			method
		);
		Ok(receipt)
	}

	/// Signs a permit for the game as `user` and deposits `amount`.
	pub async fn deposit(
		&self,
		user: &dyn AccountInterface,
		amount: U256,
		token_price: U256,
	) -> Result<TransactionReceipt> {
		let deadline = self.deadline();
		let permit = self
			.get_permit_signature(user, self.game.address(), amount, deadline)
			.await?;
		self.deposit_with_permit(user.address(), amount, token_price, &permit)
			.await
	}

	/// Signs a toss as `user` and submits it.
	pub async fn toss(
		&self,
		user: &dyn AccountInterface,
		amount: U256,
		token_price: U256,
		toss_result: bool,
	) -> Result<TransactionReceipt> {
		let deadline = self.deadline();
		let toss = self
			.get_toss_signature(user, amount, token_price, toss_result, deadline)
			.await?;
		self.toss_coin(user.address(), amount, token_price, toss_result, &toss)
			.await
	}

	/// Deposits `amount` and tosses it, with one deadline for both signatures.
	///
	/// The toss is signed after the deposit is mined.
	pub async fn deposit_and_toss(
		&self,
		user: &dyn AccountInterface,
		amount: U256,
		token_price: U256,
		toss_result: bool,
	) -> Result<DepositAndTossReceipts> {
		let deadline = self.deadline();

		let permit = self
			.get_permit_signature(user, self.game.address(), amount, deadline)
			.await?;
		let deposit = self
			.deposit_with_permit(user.address(), amount, token_price, &permit)
			.await?;

		let toss_signature = self
			.get_toss_signature(user, amount, token_price, toss_result, deadline)
			.await?;
		let toss = self
			.toss_coin(
				user.address(),
				amount,
				token_price,
				toss_result,
				&toss_signature,
			)
			.await?;

		Ok(DepositAndTossReceipts { deposit, toss })
	}
}
