//! Configuration module for the toss game operator.
//!
//! Configuration is read from environment variables by default (the binary
//! loads a `.env` file first). A TOML file can be used instead; `${VAR}` and
//! `${VAR:-default}` references inside it are resolved from the environment
//! before parsing. Either way the result is validated before it is returned.

use alloy_primitives::{Address, U256};
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use toss_types::{parse_token_amount, SecretString, DEFAULT_DOMAIN_VERSION, NAME_TOSS_GAME};

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

pub const ENV_RPC_URL: &str = "RPC_URL";
pub const ENV_OPERATOR_KEY: &str = "OPERATOR_KEY";
pub const ENV_USER_KEY: &str = "USER_KEY";
pub const ENV_GAME_ADDRESS: &str = "GAME_ADDRESS";
pub const ENV_TOKEN_ADDRESS: &str = "TOKEN_ADDRESS";
pub const ENV_GAME_ARTIFACT: &str = "GAME_ARTIFACT";
pub const ENV_TOKEN_ARTIFACT: &str = "TOKEN_ARTIFACT";
pub const ENV_GAS_LIMIT: &str = "GAS_LIMIT";
pub const ENV_GAS_PRICE: &str = "GAS_PRICE";
pub const ENV_MAX_FEE_PER_GAS: &str = "MAX_FEE_PER_GAS";
pub const ENV_MAX_PRIORITY_FEE_PER_GAS: &str = "MAX_PRIORITY_FEE_PER_GAS";
pub const ENV_TOKEN_PRICE: &str = "TOKEN_PRICE";
pub const ENV_DEADLINE_SECONDS: &str = "DEADLINE_SECONDS";
pub const ENV_RECEIPT_TIMEOUT_SECONDS: &str = "RECEIPT_TIMEOUT_SECONDS";

/// Main configuration structure for the operator.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	/// RPC endpoint settings.
	#[serde(default)]
	pub network: NetworkConfig,
	/// Operator and user keys.
	pub accounts: AccountsConfig,
	/// Deployed contracts and their ABI artifacts.
	pub contracts: ContractsConfig,
	/// Gas settings for relayed transactions.
	#[serde(default)]
	pub gas: GasConfig,
	/// Signing parameters of the game.
	#[serde(default)]
	pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
	/// JSON-RPC HTTP endpoint.
	#[serde(default = "default_rpc_url")]
	pub rpc_url: String,
	/// How long to wait for a transaction receipt.
	#[serde(default = "default_receipt_timeout_seconds")]
	pub receipt_timeout_seconds: u64,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self {
			rpc_url: default_rpc_url(),
			receipt_timeout_seconds: default_receipt_timeout_seconds(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountsConfig {
	/// Key of the account that pays gas and relays transactions.
	pub operator_key: SecretString,
	/// Key of the player. Only needed by flows that sign on the user's behalf.
	#[serde(default)]
	pub user_key: Option<SecretString>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractsConfig {
	pub game_address: Address,
	pub token_address: Address,
	#[serde(default = "default_game_artifact")]
	pub game_artifact: PathBuf,
	#[serde(default = "default_token_artifact")]
	pub token_artifact: PathBuf,
}

/// Gas settings for relayed transactions.
///
/// Fee fields left unset are filled by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct GasConfig {
	#[serde(default = "default_gas_limit")]
	pub gas_limit: u64,
	#[serde(default)]
	pub gas_price: Option<u64>,
	#[serde(default)]
	pub max_fee_per_gas: Option<u64>,
	#[serde(default)]
	pub max_priority_fee_per_gas: Option<u64>,
}

impl Default for GasConfig {
	fn default() -> Self {
		Self {
			gas_limit: default_gas_limit(),
			gas_price: None,
			max_fee_per_gas: None,
			max_priority_fee_per_gas: None,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
	/// Token price in ether units, e.g. `0.00000287528`.
	#[serde(default = "default_token_price")]
	pub token_price: String,
	/// Validity window of user signatures.
	#[serde(default = "default_deadline_seconds")]
	pub deadline_seconds: u64,
	/// EIP-712 domain name of the game contract.
	#[serde(default = "default_game_domain_name")]
	pub domain_name: String,
	/// EIP-712 domain version of the game contract.
	#[serde(default = "default_domain_version")]
	pub domain_version: String,
	/// EIP-712 domain version of the token.
	#[serde(default = "default_domain_version")]
	pub token_domain_version: String,
}

impl Default for GameConfig {
	fn default() -> Self {
		Self {
			token_price: default_token_price(),
			deadline_seconds: default_deadline_seconds(),
			domain_name: default_game_domain_name(),
			domain_version: default_domain_version(),
			token_domain_version: default_domain_version(),
		}
	}
}

impl GameConfig {
	/// Token price in wei.
	pub fn token_price_wei(&self) -> Result<U256, ConfigError> {
		parse_token_amount(&self.token_price)
			.map_err(|e| ConfigError::Validation(format!("Invalid token price: {e}")))
	}
}

fn default_rpc_url() -> String {
	"http://localhost:8545".to_string()
}

fn default_receipt_timeout_seconds() -> u64 {
	120
}

fn default_game_artifact() -> PathBuf {
	PathBuf::from("out/TossGame.sol/TossGame.json")
}

fn default_token_artifact() -> PathBuf {
	PathBuf::from("out/MockERC20.sol/MockERC20.json")
}

fn default_gas_limit() -> u64 {
	500_000
}

fn default_token_price() -> String {
	"0.00000287528".to_string()
}

fn default_deadline_seconds() -> u64 {
	3600
}

fn default_game_domain_name() -> String {
	NAME_TOSS_GAME.to_string()
}

fn default_domain_version() -> String {
	DEFAULT_DOMAIN_VERSION.to_string()
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {e}")))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let var_name = var_name.as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{var_name}' not found"
					)));
				},
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Builds the configuration from process environment variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_env_with(|key| std::env::var(key).ok())
	}

	/// Builds the configuration from an arbitrary variable lookup.
	///
	/// Empty values are treated as unset.
	pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
		let required = |key: &str| {
			get(key).ok_or_else(|| {
				ConfigError::Validation(format!("Missing required environment variable {key}"))
			})
		};

		let config = Config {
			network: NetworkConfig {
				rpc_url: get(ENV_RPC_URL).unwrap_or_else(default_rpc_url),
				receipt_timeout_seconds: parse_optional(
					ENV_RECEIPT_TIMEOUT_SECONDS,
					get(ENV_RECEIPT_TIMEOUT_SECONDS),
				)?
				.unwrap_or_else(default_receipt_timeout_seconds),
			},
			accounts: AccountsConfig {
				operator_key: SecretString::from(required(ENV_OPERATOR_KEY)?),
				user_key: get(ENV_USER_KEY).map(SecretString::from),
			},
			contracts: ContractsConfig {
				game_address: parse_value(ENV_GAME_ADDRESS, &required(ENV_GAME_ADDRESS)?)?,
				token_address: parse_value(ENV_TOKEN_ADDRESS, &required(ENV_TOKEN_ADDRESS)?)?,
				game_artifact: get(ENV_GAME_ARTIFACT)
					.map(PathBuf::from)
					.unwrap_or_else(default_game_artifact),
				token_artifact: get(ENV_TOKEN_ARTIFACT)
					.map(PathBuf::from)
					.unwrap_or_else(default_token_artifact),
			},
			gas: GasConfig {
				gas_limit: parse_optional(ENV_GAS_LIMIT, get(ENV_GAS_LIMIT))?
					.unwrap_or_else(default_gas_limit),
				gas_price: parse_optional(ENV_GAS_PRICE, get(ENV_GAS_PRICE))?,
				max_fee_per_gas: parse_optional(ENV_MAX_FEE_PER_GAS, get(ENV_MAX_FEE_PER_GAS))?,
				max_priority_fee_per_gas: parse_optional(
					ENV_MAX_PRIORITY_FEE_PER_GAS,
					get(ENV_MAX_PRIORITY_FEE_PER_GAS),
				)?,
			},
			game: GameConfig {
				token_price: get(ENV_TOKEN_PRICE).unwrap_or_else(default_token_price),
				deadline_seconds: parse_optional(ENV_DEADLINE_SECONDS, get(ENV_DEADLINE_SECONDS))?
					.unwrap_or_else(default_deadline_seconds),
				..GameConfig::default()
			},
		};

		config.validate()?;
		Ok(config)
	}

	/// Loads configuration from a TOML file, resolving `${VAR}` references
	/// against the environment.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = tokio::fs::read_to_string(path.as_ref()).await?;
		content.parse()
	}

	/// The user key, or an error naming the variable to set.
	pub fn user_key(&self) -> Result<&SecretString, ConfigError> {
		self.accounts.user_key.as_ref().ok_or_else(|| {
			ConfigError::Validation(format!("{ENV_USER_KEY} is required for this command"))
		})
	}

	/// Validates the configuration to ensure all required fields are properly set.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let rpc_url = self.network.rpc_url.trim();
		if !(rpc_url.starts_with("http://") || rpc_url.starts_with("https://")) {
			return Err(ConfigError::Validation(format!(
				"RPC URL must be an http(s) endpoint, got '{rpc_url}'"
			)));
		}
		if self.network.receipt_timeout_seconds == 0 {
			return Err(ConfigError::Validation(
				"Receipt timeout must be greater than zero".into(),
			));
		}

		if self.accounts.operator_key.is_empty() {
			return Err(ConfigError::Validation("Operator key cannot be empty".into()));
		}

		if self.contracts.game_address.is_zero() {
			return Err(ConfigError::Validation("Game address cannot be zero".into()));
		}
		if self.contracts.token_address.is_zero() {
			return Err(ConfigError::Validation("Token address cannot be zero".into()));
		}

		if self.gas.gas_limit == 0 {
			return Err(ConfigError::Validation(
				"Gas limit must be greater than zero".into(),
			));
		}
		let has_eip1559 =
			self.gas.max_fee_per_gas.is_some() || self.gas.max_priority_fee_per_gas.is_some();
		if self.gas.gas_price.is_some() && has_eip1559 {
			return Err(ConfigError::Validation(
				"Cannot set both a legacy gas price and EIP-1559 fees".into(),
			));
		}
		if let (Some(max_fee), Some(priority_fee)) =
			(self.gas.max_fee_per_gas, self.gas.max_priority_fee_per_gas)
		{
			if priority_fee > max_fee {
				return Err(ConfigError::Validation(
					"Max priority fee cannot exceed max fee per gas".into(),
				));
			}
		}

		if self.game.deadline_seconds == 0 {
			return Err(ConfigError::Validation(
				"Deadline window must be greater than zero".into(),
			));
		}
		if self.game.domain_name.is_empty()
			|| self.game.domain_version.is_empty()
			|| self.game.token_domain_version.is_empty()
		{
			return Err(ConfigError::Validation(
				"EIP-712 domain name and version cannot be empty".into(),
			));
		}
		self.game.token_price_wei()?;

		Ok(())
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
	T: FromStr,
	T::Err: std::fmt::Display,
{
	value
		.trim()
		.parse()
		.map_err(|e| ConfigError::Validation(format!("Invalid {key} '{value}': {e}")))
}

fn parse_optional<T>(key: &str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
	T: FromStr,
	T::Err: std::fmt::Display,
{
	value.map(|v| parse_value(key, &v)).transpose()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;
	use std::io::Write;

	const OPERATOR_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
	const GAME: &str = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512";
	const TOKEN: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

	fn base_env() -> HashMap<&'static str, String> {
		HashMap::from([
			(ENV_OPERATOR_KEY, OPERATOR_KEY.to_string()),
			(ENV_GAME_ADDRESS, GAME.to_string()),
			(ENV_TOKEN_ADDRESS, TOKEN.to_string()),
		])
	}

	fn load(env: &HashMap<&'static str, String>) -> Result<Config, ConfigError> {
		Config::from_env_with(|key| env.get(key).cloned())
	}

	#[test]
	fn test_env_defaults() {
		let config = load(&base_env()).unwrap();

		assert_eq!(config.network.rpc_url, "http://localhost:8545");
		assert_eq!(config.network.receipt_timeout_seconds, 120);
		assert_eq!(config.gas.gas_limit, 500_000);
		assert!(config.gas.gas_price.is_none());
		assert_eq!(config.game.deadline_seconds, 3600);
		assert_eq!(config.game.domain_name, "TossGame");
		assert_eq!(config.game.domain_version, "1");
		assert_eq!(
			config.game.token_price_wei().unwrap(),
			U256::from(2_875_280_000_000u64)
		);
		assert_eq!(
			config.contracts.game_artifact,
			PathBuf::from("out/TossGame.sol/TossGame.json")
		);
		assert_eq!(
			config.contracts.token_artifact,
			PathBuf::from("out/MockERC20.sol/MockERC20.json")
		);
		assert_eq!(config.contracts.game_address, GAME.parse::<Address>().unwrap());
		assert!(config.accounts.user_key.is_none());
		assert!(config.user_key().is_err());
	}

	#[test]
	fn test_env_overrides() {
		let mut env = base_env();
		env.insert(ENV_RPC_URL, "https://rpc.example.org".to_string());
		env.insert(ENV_USER_KEY, "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d".to_string());
		env.insert(ENV_GAS_LIMIT, "750000".to_string());
		env.insert(ENV_MAX_FEE_PER_GAS, "30000000000".to_string());
		env.insert(ENV_MAX_PRIORITY_FEE_PER_GAS, "1000000000".to_string());
		env.insert(ENV_TOKEN_PRICE, "0.5".to_string());
		env.insert(ENV_DEADLINE_SECONDS, "600".to_string());

		let config = load(&env).unwrap();
		assert_eq!(config.network.rpc_url, "https://rpc.example.org");
		assert_eq!(config.gas.gas_limit, 750_000);
		assert_eq!(config.gas.max_fee_per_gas, Some(30_000_000_000));
		assert_eq!(config.gas.max_priority_fee_per_gas, Some(1_000_000_000));
		assert_eq!(config.game.deadline_seconds, 600);
		assert_eq!(
			config.game.token_price_wei().unwrap(),
			U256::from(500_000_000_000_000_000u64)
		);
		assert!(config.user_key().is_ok());
	}

	#[test]
	fn test_empty_values_are_unset() {
		let mut env = base_env();
		env.insert(ENV_RPC_URL, String::new());
		env.insert(ENV_GAS_PRICE, "  ".to_string());

		let config = load(&env).unwrap();
		assert_eq!(config.network.rpc_url, "http://localhost:8545");
		assert!(config.gas.gas_price.is_none());
	}

	#[test]
	fn test_missing_required_variable() {
		for key in [ENV_OPERATOR_KEY, ENV_GAME_ADDRESS, ENV_TOKEN_ADDRESS] {
			let mut env = base_env();
			env.remove(key);
			let err = load(&env).unwrap_err();
			assert!(matches!(err, ConfigError::Validation(_)));
			assert!(err.to_string().contains(key));
		}
	}

	#[test]
	fn test_invalid_values_rejected() {
		let mut env = base_env();
		env.insert(ENV_GAME_ADDRESS, "0x1234".to_string());
		assert!(load(&env).unwrap_err().to_string().contains(ENV_GAME_ADDRESS));

		let mut env = base_env();
		env.insert(ENV_GAS_LIMIT, "lots".to_string());
		assert!(load(&env).unwrap_err().to_string().contains(ENV_GAS_LIMIT));

		let mut env = base_env();
		env.insert(ENV_TOKEN_PRICE, "cheap".to_string());
		assert!(load(&env).unwrap_err().to_string().contains("token price"));

		let mut env = base_env();
		env.insert(ENV_RPC_URL, "ws://localhost:8546".to_string());
		assert!(load(&env).is_err());

		let mut env = base_env();
		env.insert(ENV_GAS_LIMIT, "0".to_string());
		assert!(load(&env).is_err());
	}

	#[test]
	fn test_fee_validation() {
		let mut env = base_env();
		env.insert(ENV_GAS_PRICE, "1000000000".to_string());
		env.insert(ENV_MAX_FEE_PER_GAS, "2000000000".to_string());
		assert!(load(&env).is_err());

		let mut env = base_env();
		env.insert(ENV_MAX_FEE_PER_GAS, "1".to_string());
		env.insert(ENV_MAX_PRIORITY_FEE_PER_GAS, "2".to_string());
		assert!(load(&env).is_err());
	}

	#[test]
	fn test_env_var_resolution() {
		std::env::set_var("TOSS_TEST_HOST", "localhost");
		std::env::set_var("TOSS_TEST_PORT", "8545");

		let input = "rpc_url = \"http://${TOSS_TEST_HOST}:${TOSS_TEST_PORT}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "rpc_url = \"http://localhost:8545\"");

		std::env::remove_var("TOSS_TEST_HOST");
		std::env::remove_var("TOSS_TEST_PORT");
	}

	#[test]
	fn test_env_var_with_default() {
		let input = "value = \"${TOSS_MISSING_VAR:-default_value}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "value = \"default_value\"");
	}

	#[test]
	fn test_missing_env_var_error() {
		let input = "value = \"${TOSS_MISSING_VAR}\"";
		let result = resolve_env_vars(input);
		assert!(result.is_err());
		assert!(result.unwrap_err().to_string().contains("TOSS_MISSING_VAR"));
	}

	#[test]
	fn test_toml_config_with_defaults() {
		let config_str = format!(
			r#"
[accounts]
operator_key = "${{TOSS_TEST_OPERATOR_KEY:-{OPERATOR_KEY}}}"

[contracts]
game_address = "{GAME}"
token_address = "{TOKEN}"
"#
		);

		let config: Config = config_str.parse().unwrap();
		config
			.accounts
			.operator_key
			.with_exposed(|key| assert_eq!(key, OPERATOR_KEY));
		assert_eq!(config.network.rpc_url, "http://localhost:8545");
		assert_eq!(config.gas.gas_limit, 500_000);
		assert_eq!(config.game.domain_name, "TossGame");
	}

	#[test]
	fn test_toml_config_full() {
		let config_str = format!(
			r#"
[network]
rpc_url = "https://sepolia.example.org"
receipt_timeout_seconds = 300

[accounts]
operator_key = "{OPERATOR_KEY}"
user_key = "{OPERATOR_KEY}"

[contracts]
game_address = "{GAME}"
token_address = "{TOKEN}"
game_artifact = "abi/TossGame.json"
token_artifact = "abi/Token.json"

[gas]
gas_limit = 400000
gas_price = 2000000000

[game]
token_price = "0.001"
deadline_seconds = 900
domain_name = "TossGameV2"
domain_version = "2"
"#
		);

		let config: Config = config_str.parse().unwrap();
		assert_eq!(config.network.receipt_timeout_seconds, 300);
		assert_eq!(config.contracts.game_artifact, PathBuf::from("abi/TossGame.json"));
		assert_eq!(config.gas.gas_limit, 400_000);
		assert_eq!(config.gas.gas_price, Some(2_000_000_000));
		assert_eq!(config.game.domain_name, "TossGameV2");
		assert_eq!(config.game.domain_version, "2");
		assert_eq!(config.game.deadline_seconds, 900);
		assert_eq!(config.game.token_domain_version, "1");
	}

	#[test]
	fn test_toml_eip1559_fees() {
		let config_str = format!(
			r#"
[accounts]
operator_key = "{OPERATOR_KEY}"

[contracts]
game_address = "{GAME}"
token_address = "{TOKEN}"

[gas]
max_fee_per_gas = 30000000000
max_priority_fee_per_gas = 1000000000

[game]
domain_version = "2"
token_domain_version = "1"
"#
		);

		let config: Config = config_str.parse().unwrap();
		assert!(config.gas.gas_price.is_none());
		assert_eq!(config.gas.max_fee_per_gas, Some(30_000_000_000));
		assert_eq!(config.gas.max_priority_fee_per_gas, Some(1_000_000_000));
		assert_eq!(config.game.domain_version, "2");
		assert_eq!(config.game.token_domain_version, "1");
	}

	#[test]
	fn test_toml_parse_error() {
		let err = "[accounts\noperator_key = 1".parse::<Config>().unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[test]
	fn test_toml_validation_error() {
		let config_str = format!(
			r#"
[accounts]
operator_key = "{OPERATOR_KEY}"

[contracts]
game_address = "0x0000000000000000000000000000000000000000"
token_address = "{TOKEN}"
"#
		);
		let err = config_str.parse::<Config>().unwrap_err();
		assert!(err.to_string().contains("Game address"));
	}

	#[tokio::test]
	async fn test_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(
			file,
			r#"
[accounts]
operator_key = "{OPERATOR_KEY}"

[contracts]
game_address = "{GAME}"
token_address = "{TOKEN}"
"#
		)
		.unwrap();

		let config = Config::from_file(file.path()).await.unwrap();
		assert_eq!(config.contracts.token_address, TOKEN.parse::<Address>().unwrap());
	}

	#[tokio::test]
	async fn test_from_missing_file() {
		let err = Config::from_file("/nonexistent/toss.toml").await.unwrap_err();
		assert!(matches!(err, ConfigError::Io(_)));
	}

	#[test]
	fn test_debug_does_not_leak_keys() {
		let config = load(&base_env()).unwrap();
		let printed = format!("{config:?}");
		assert!(!printed.contains("ac0974bec39a17e36ba4a6b4d238ff944bacb478"));
	}
}
