//! User signatures for the permit and toss messages.
//!
//! Digests are computed locally with the EIP-712 encoder from `toss-types`
//! and signed as raw hashes with the user's key. Where a contract exposes
//! `DOMAIN_SEPARATOR()`, the on-chain value is compared against the locally
//! computed one and a mismatch is logged.

use crate::contracts::Contract;
use crate::error::Result;
use crate::operator::TossGameOperator;
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256, U256};
use serde::Serialize;
use toss_account::AccountInterface;
use toss_types::{
	compute_final_digest, Eip712Domain, PermitMessage, PermitSignature, TossCoinMessage,
	TossSignature, UserSignature,
};
use tracing::{debug, info, instrument, warn};

const DOMAIN_SEPARATOR_METHOD: &str = "DOMAIN_SEPARATOR";

/// Locally computed domain separator next to the contract's own value.
#[derive(Debug, Clone, Serialize)]
pub struct DomainReport {
	pub contract: String,
	pub domain: Eip712Domain,
	pub computed: B256,
	/// `None` when the contract does not expose `DOMAIN_SEPARATOR()`.
	pub on_chain: Option<B256>,
}

impl DomainReport {
	/// Whether both separators agree, if the contract exposes one.
	pub fn matches(&self) -> Option<bool> {
		self.on_chain.map(|on_chain| on_chain == self.computed)
	}
}

fn log_domain(contract: &str, domain: &Eip712Domain, separator: &B256) {
	info!(
		contract,
		name = %domain.name,
		chain_id = domain.chain_id,
		verifying_contract = %domain.verifying_contract,
		domain_separator = %separator,
		"EIP-712 domain"
	);
	debug!(
		contract,
		type_hash = %Eip712Domain::type_hash(),
		name_hash = %domain.name_hash(),
		version_hash = %domain.version_hash(),
		"EIP-712 domain components"
	);
}

/// Signs an EIP-712 digest with `account` and splits the signature.
pub async fn sign_digest(account: &dyn AccountInterface, digest: &B256) -> Result<UserSignature> {
	let signature = account.sign_hash(digest).await?;
	Ok(UserSignature::from(signature))
}

impl TossGameOperator {
	/// EIP-712 domain of the token for the given name and chain.
	pub fn token_domain(&self, name: impl Into<String>, chain_id: u64) -> Eip712Domain {
		Eip712Domain::new(
			name,
			self.settings.token_domain_version.clone(),
			chain_id,
			self.token.address(),
		)
	}

	/// EIP-712 domain of the game on the given chain.
	pub fn game_domain(&self, chain_id: u64) -> Eip712Domain {
		Eip712Domain::new(
			self.settings.game_domain_name.clone(),
			self.settings.domain_version.clone(),
			chain_id,
			self.game.address(),
		)
	}

	/// Reads `DOMAIN_SEPARATOR()` from `contract` and compares it with `computed`.
	///
	/// Returns the on-chain value, or `None` if the ABI has no such function.
	async fn check_domain_separator(
		&self,
		contract: &Contract,
		chain_id: u64,
		computed: B256,
	) -> Result<Option<B256>> {
		if !contract.has_function(DOMAIN_SEPARATOR_METHOD) {
			debug!(contract = contract.name(), "No DOMAIN_SEPARATOR in ABI, skipping comparison");
			return Ok(None);
		}

		let on_chain = contract
			.call_b256(&*self.delivery, chain_id, DOMAIN_SEPARATOR_METHOD, &[])
			.await?;

		if on_chain == computed {
			debug!(contract = contract.name(), domain_separator = %computed, "Domain separator matches");
		} else {
			warn!(
				contract = contract.name(),
				on_chain = %on_chain,
				computed = %computed,
				"Domain separator mismatch, signatures will not verify on-chain"
			);
		}
		Ok(Some(on_chain))
	}

	/// Produces an ERC-2612 permit signature from `user` for `spender`.
	///
	/// # Arguments
	/// * `user` - Token owner signing the permit
	/// * `spender` - Address allowed to pull the tokens, normally the game
	/// * `amount` - Allowance in token base units
	/// * `deadline` - Unix timestamp after which the permit is invalid
	///
	/// # Errors
	/// Returns an error if any chain read fails or signing fails
	#[instrument(skip_all, fields(owner = %user.address(), spender = %spender, amount = %amount))]
	pub async fn get_permit_signature(
		&self,
		user: &dyn AccountInterface,
		spender: Address,
		amount: U256,
		deadline: U256,
	) -> Result<PermitSignature> {
		let owner = user.address();
		let chain_id = self.delivery.chain_id().await?;

		let name = self
			.token
			.call_string(&*self.delivery, chain_id, "name", &[])
			.await?;
		let nonce = self
			.token
			.call_u256(
				&*self.delivery,
				chain_id,
				"nonces",
				&[DynSolValue::Address(owner)],
			)
			.await?;

		let domain = self.token_domain(name, chain_id);
		let separator = domain.separator();
		log_domain("token", &domain, &separator);
		self.check_domain_separator(&self.token, chain_id, separator)
			.await?;

		let message = PermitMessage {
			owner,
			spender,
			value: amount,
			nonce,
			deadline,
		};
		let digest = compute_final_digest(&separator, &message.struct_hash());
		let signature = sign_digest(user, &digest).await?;
		debug!(nonce = %nonce, digest = %digest, v = signature.v, "Permit signed");

		Ok(PermitSignature {
			signature,
			deadline,
		})
	}

	/// Produces a `TossCoin` signature from `user` using the game's current
	/// nonce for that user.
	///
	/// # Arguments
	/// * `user` - Player signing the toss
	/// * `amount` - Tokens wagered, in base units
	/// * `token_price` - Token price scaled by 1e18
	/// * `toss_result` - `true` for heads
	/// * `deadline` - Unix timestamp after which the toss is invalid
	///
	/// # Errors
	/// Returns an error if any chain read fails or signing fails
	#[instrument(skip_all, fields(user = %user.address(), amount = %amount, toss_result = toss_result))]
	pub async fn get_toss_signature(
		&self,
		user: &dyn AccountInterface,
		amount: U256,
		token_price: U256,
		toss_result: bool,
		deadline: U256,
	) -> Result<TossSignature> {
		let address = user.address();
		let chain_id = self.delivery.chain_id().await?;

		let nonce = self
			.game
			.call_u256(
				&*self.delivery,
				chain_id,
				"nonces",
				&[DynSolValue::Address(address)],
			)
			.await?;

		let domain = self.game_domain(chain_id);
		let separator = domain.separator();
		log_domain("game", &domain, &separator);
		self.check_domain_separator(&self.game, chain_id, separator)
			.await?;

		let message = TossCoinMessage {
			user: address,
			token: self.token.address(),
			token_amount: amount,
			token_price,
			nonce,
			deadline,
			toss_result,
		};
		let digest = compute_final_digest(&separator, &message.struct_hash());
		let signature = sign_digest(user, &digest).await?;
		debug!(nonce = %nonce, digest = %digest, v = signature.v, "Toss signed");

		Ok(TossSignature {
			signature,
			deadline,
			nonce,
		})
	}

	/// Computes both domain separators and reads the on-chain ones.
	pub async fn domain_reports(&self) -> Result<Vec<DomainReport>> {
		let chain_id = self.delivery.chain_id().await?;

		let name = self
			.token
			.call_string(&*self.delivery, chain_id, "name", &[])
			.await?;
		let token_domain = self.token_domain(name, chain_id);
		let token_computed = token_domain.separator();
		let token_on_chain = self
			.check_domain_separator(&self.token, chain_id, token_computed)
			.await?;

		let game_domain = self.game_domain(chain_id);
		let game_computed = game_domain.separator();
		let game_on_chain = self
			.check_domain_separator(&self.game, chain_id, game_computed)
			.await?;

		Ok(vec![
			DomainReport {
				contract: self.token.name().to_string(),
				domain: token_domain,
				computed: token_computed,
				on_chain: token_on_chain,
			},
			DomainReport {
				contract: self.game.name().to_string(),
				domain: game_domain,
				computed: game_computed,
				on_chain: game_on_chain,
			},
		])
	}
}
