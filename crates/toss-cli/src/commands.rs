//! Command handlers.

use crate::cli::output::Display;
use crate::cli::{Cli, Commands};
use crate::logging::{operation_start, operation_success};
use alloy_primitives::U256;
use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use toss_account::{AccountInterface, LocalWallet};
use toss_config::Config;
use toss_core::{DomainReport, FlowStep, OperatorCallback, OperatorEvent, TossGameOperator};
use toss_types::{format_token_amount, parse_token_amount, TossPrediction};
use tracing::debug;

pub const PREDICTION_PROMPT: &str = "Enter toss prediction (heads/tails): ";

/// Loads configuration from `path`, or from the environment when absent.
pub async fn load_config(path: Option<&Path>) -> Result<Config> {
	match path {
		Some(path) => Config::from_file(path)
			.await
			.with_context(|| format!("Failed to load configuration from {}", path.display())),
		None => Config::from_env().context("Failed to load configuration from environment"),
	}
}

/// Token price in wei, taking the command-line override into account.
pub fn resolve_token_price(config: &Config, token_price: Option<&str>) -> Result<U256> {
	match token_price {
		Some(price) => {
			parse_token_amount(price).with_context(|| format!("Invalid token price '{}'", price))
		},
		None => Ok(config.game.token_price_wei()?),
	}
}

fn parse_amount(amount: &str) -> Result<U256> {
	parse_token_amount(amount).with_context(|| format!("Invalid amount '{}'", amount))
}

/// Line printed for an operator progress event.
pub fn event_message(event: &OperatorEvent) -> String {
	match event {
		OperatorEvent::Submitting { step } => format!("Submitting {}...", step),
		OperatorEvent::Confirmed {
			step: FlowStep::Deposit,
			receipt,
		} => format!("Deposit successful! Tx hash: {}", receipt.hash),
		OperatorEvent::Confirmed {
			step: FlowStep::Toss,
			receipt,
		} => format!("Toss submitted! Tx hash: {}", receipt.hash),
	}
}

fn progress_callback() -> OperatorCallback {
	Box::new(|event: &OperatorEvent| match event {
		OperatorEvent::Submitting { .. } => Display::info(&event_message(event)),
		OperatorEvent::Confirmed { receipt, .. } => {
			Display::success(&event_message(event));
			debug!(
				tx_hash = %receipt.hash,
				block_number = receipt.block_number,
				gas_used = receipt.gas_used,
				"Receipt"
			);
		},
	})
}

/// Reads one prediction answer from `reader`.
///
/// Anything other than `heads` counts as tails.
pub async fn read_prediction<R>(reader: &mut R) -> Result<TossPrediction>
where
	R: AsyncBufRead + Unpin,
{
	let mut line = String::new();
	let read = reader
		.read_line(&mut line)
		.await
		.context("Failed to read prediction")?;
	if read == 0 {
		bail!("No prediction given");
	}
	Ok(TossPrediction::from_answer(&line))
}

async fn prompt_prediction() -> Result<TossPrediction> {
	print!("{}", PREDICTION_PROMPT);
	std::io::stdout().flush()?;
	let mut stdin = BufReader::new(tokio::io::stdin());
	read_prediction(&mut stdin).await
}

async fn prediction_or_prompt(prediction: Option<TossPrediction>) -> Result<TossPrediction> {
	match prediction {
		Some(prediction) => Ok(prediction),
		None => prompt_prediction().await,
	}
}

/// Operator, player and token price shared by the flow commands.
struct Session {
	operator: TossGameOperator,
	user: LocalWallet,
	token_price: U256,
}

impl Session {
	async fn open(config: &Config, token_price: Option<&str>) -> Result<Self> {
		let token_price = resolve_token_price(config, token_price)?;
		let user = LocalWallet::from_secret(config.user_key()?)?;
		let operator = TossGameOperator::from_config(config)
			.await?
			.with_callback(progress_callback());

		Display::kv("Operator", &operator.operator_address().to_string());
		Display::kv("User", &user.address().to_string());
		Display::kv("Token price", &format!("{} ETH", format_token_amount(token_price)));

		Ok(Self {
			operator,
			user,
			token_price,
		})
	}

	async fn deposit(&self, amount: U256) -> Result<()> {
		operation_start("deposit", &format!("amount={}", amount));
		self.operator
			.deposit(&self.user, amount, self.token_price)
			.await?;
		Ok(())
	}

	async fn toss(&self, amount: U256, prediction: TossPrediction) -> Result<()> {
		operation_start(
			"toss",
			&format!("amount={} prediction={}", amount, prediction),
		);
		self.operator
			.toss(
				&self.user,
				amount,
				self.token_price,
				prediction.as_toss_result(),
			)
			.await?;
		Ok(())
	}
}

/// Runs the parsed command.
pub async fn run(cli: Cli) -> Result<()> {
	let config = load_config(cli.config.as_deref()).await?;
	let token_price = cli.token_price.as_deref();

	match cli.command {
		Commands::Play {
			deposit_amount,
			toss_amount,
		} => {
			let deposit_amount = parse_amount(&deposit_amount)?;
			let toss_amount = parse_amount(&toss_amount)?;
			let session = Session::open(&config, token_price).await?;

			session.deposit(deposit_amount).await?;
			let prediction = prompt_prediction().await?;
			session.toss(toss_amount, prediction).await?;
			operation_success("play", "Game round relayed");
		},

		Commands::Deposit { amount } => {
			let amount = parse_amount(&amount)?;
			let session = Session::open(&config, token_price).await?;
			session.deposit(amount).await?;
			operation_success("deposit", "Deposit relayed");
		},

		Commands::Toss { amount, prediction } => {
			let amount = parse_amount(&amount)?;
			let session = Session::open(&config, token_price).await?;
			let prediction = prediction_or_prompt(prediction).await?;
			session.toss(amount, prediction).await?;
			operation_success("toss", "Toss relayed");
		},

		Commands::DepositAndToss { amount, prediction } => {
			let amount = parse_amount(&amount)?;
			let session = Session::open(&config, token_price).await?;
			let prediction = prediction_or_prompt(prediction).await?;
			operation_start(
				"deposit-and-toss",
				&format!("amount={} prediction={}", amount, prediction),
			);
			session
				.operator
				.deposit_and_toss(
					&session.user,
					amount,
					session.token_price,
					prediction.as_toss_result(),
				)
				.await?;
			operation_success("deposit-and-toss", "Deposit and toss relayed");
		},

		Commands::Domain => {
			let operator = TossGameOperator::from_config(&config).await?;
			for report in operator.domain_reports().await? {
				show_domain_report(&report);
			}
		},
	}

	Ok(())
}

fn show_domain_report(report: &DomainReport) {
	Display::header(&report.contract);
	Display::kv("Name", &report.domain.name);
	Display::kv("Version", &report.domain.version);
	Display::kv("Chain ID", &report.domain.chain_id.to_string());
	Display::kv(
		"Verifying contract",
		&report.domain.verifying_contract.to_string(),
	);
	Display::kv("Computed separator", &report.computed.to_string());

	match (report.on_chain, report.matches()) {
		(Some(on_chain), Some(true)) => {
			Display::kv("On-chain separator", &on_chain.to_string());
			Display::success("Domain separator matches");
		},
		(Some(on_chain), _) => {
			Display::kv("On-chain separator", &on_chain.to_string());
			Display::warning("Domain separator mismatch");
		},
		(None, _) => Display::info("Contract does not expose DOMAIN_SEPARATOR()"),
	}
}
