//! Contract handles built from ABI artifacts
//!
//! A `Contract` pairs a deployed address with its JSON ABI and takes care of
//! encoding calls, running read-only calls through the delivery layer and
//! decoding the returned data.

use crate::error::{OperatorError, Result};
use alloy_dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy_json_abi::{Function, JsonAbi};
use alloy_primitives::{Address, Bytes, B256, U256};
use std::path::Path;
use toss_delivery::DeliveryInterface;
use toss_types::Transaction;
use tracing::debug;

/// Deployed contract with its ABI.
#[derive(Debug, Clone)]
pub struct Contract {
	name: String,
	address: Address,
	abi: JsonAbi,
}

impl Contract {
	pub fn new(name: impl Into<String>, address: Address, abi: JsonAbi) -> Self {
		Self {
			name: name.into(),
			address,
			abi,
		}
	}

	/// Loads the ABI from a build artifact on disk.
	///
	/// # Arguments
	/// * `name` - Name used in logs and errors
	/// * `address` - Deployed contract address
	/// * `path` - Foundry artifact (`{"abi": [...]}`) or bare ABI array
	///
	/// # Errors
	/// Returns `OperatorError::Artifact` if the file cannot be read and
	/// `OperatorError::InvalidAbi` if it holds no valid ABI
	pub async fn from_artifact(
		name: impl Into<String>,
		address: Address,
		path: &Path,
	) -> Result<Self> {
		let name = name.into();
		let content =
			tokio::fs::read_to_string(path)
				.await
				.map_err(|source| OperatorError::Artifact {
					path: path.to_path_buf(),
					source,
				})?;

		let abi = parse_abi(&content)
			.map_err(|e| OperatorError::InvalidAbi(format!("{} ({}): {}", name, path.display(), e)))?;
		debug!(contract = %name, path = %path.display(), functions = abi.functions.len(), "Loaded ABI");

		Ok(Self::new(name, address, abi))
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn address(&self) -> Address {
		self.address
	}

	/// Whether the ABI declares a function with this name.
	pub fn has_function(&self, method: &str) -> bool {
		self.abi
			.function(method)
			.is_some_and(|functions| !functions.is_empty())
	}

	/// Returns an error naming every function from `methods` the ABI lacks.
	pub fn require_functions(&self, methods: &[&str]) -> Result<()> {
		let missing: Vec<&str> = methods
			.iter()
			.copied()
			.filter(|m| !self.has_function(m))
			.collect();

		if missing.is_empty() {
			Ok(())
		} else {
			Err(OperatorError::InvalidAbi(format!(
				"{} ABI is missing: {}",
				self.name,
				missing.join(", ")
			)))
		}
	}

	/// First overload of `method`.
	pub fn function(&self, method: &str) -> Result<&Function> {
		self.abi
			.function(method)
			.and_then(|functions| functions.first())
			.ok_or_else(|| {
				OperatorError::InvalidAbi(format!("Function {} not found in {} ABI", method, self.name))
			})
	}

	/// Encodes calldata for `method` (selector followed by the arguments).
	pub fn encode(&self, method: &str, args: &[DynSolValue]) -> Result<Bytes> {
		let function = self.function(method)?;
		let data = function.abi_encode_input(args).map_err(|e| {
			OperatorError::ContractCallFailed(format!(
				"Failed to encode {}.{}: {}",
				self.name, method, e
			))
		})?;
		Ok(data.into())
	}

	/// Decodes the return data of `method`.
	pub fn decode(&self, method: &str, data: &[u8]) -> Result<Vec<DynSolValue>> {
		let function = self.function(method)?;
		function.abi_decode_output(data).map_err(|e| {
			OperatorError::ContractCallFailed(format!(
				"Failed to decode {}.{} output: {}",
				self.name, method, e
			))
		})
	}

	/// Runs a read-only call and decodes its outputs.
	pub async fn call(
		&self,
		delivery: &dyn DeliveryInterface,
		chain_id: u64,
		method: &str,
		args: &[DynSolValue],
	) -> Result<Vec<DynSolValue>> {
		let data = self.encode(method, args)?;
		let tx = Transaction::call(self.address, data.to_vec(), chain_id);

		let result = delivery.eth_call(tx).await.map_err(|e| {
			OperatorError::ContractCallFailed(format!("Call to {}.{} failed: {}", self.name, method, e))
		})?;

		self.decode(method, &result)
	}

	/// Calls a function returning a single `uint256`.
	pub async fn call_u256(
		&self,
		delivery: &dyn DeliveryInterface,
		chain_id: u64,
		method: &str,
		args: &[DynSolValue],
	) -> Result<U256> {
		match self.call(delivery, chain_id, method, args).await?.first() {
			Some(DynSolValue::Uint(value, _)) => Ok(*value),
			other => Err(self.unexpected_output(method, "uint256", other)),
		}
	}

	/// Calls a function returning a single `string`.
	pub async fn call_string(
		&self,
		delivery: &dyn DeliveryInterface,
		chain_id: u64,
		method: &str,
		args: &[DynSolValue],
	) -> Result<String> {
		match self.call(delivery, chain_id, method, args).await?.first() {
			Some(DynSolValue::String(value)) => Ok(value.clone()),
			other => Err(self.unexpected_output(method, "string", other)),
		}
	}

	/// Calls a function returning a single `bytes32`.
	pub async fn call_b256(
		&self,
		delivery: &dyn DeliveryInterface,
		chain_id: u64,
		method: &str,
		args: &[DynSolValue],
	) -> Result<B256> {
		match self.call(delivery, chain_id, method, args).await?.first() {
			Some(DynSolValue::FixedBytes(word, 32)) => Ok(*word),
			other => Err(self.unexpected_output(method, "bytes32", other)),
		}
	}

	fn unexpected_output(
		&self,
		method: &str,
		expected: &str,
		got: Option<&DynSolValue>,
	) -> OperatorError {
		OperatorError::ContractCallFailed(format!(
			"{}.{} returned {:?}, expected {}",
			self.name, method, got, expected
		))
	}
}

/// Parses a Foundry artifact or a bare ABI array.
pub fn parse_abi(content: &str) -> std::result::Result<JsonAbi, serde_json::Error> {
	let value: serde_json::Value = serde_json::from_str(content)?;
	match value {
		serde_json::Value::Object(mut artifact) => {
			let abi = artifact
				.remove("abi")
				.ok_or_else(|| serde::de::Error::custom("artifact has no \"abi\" field"))?;
			serde_json::from_value(abi)
		},
		other => serde_json::from_value(other),
	}
}
