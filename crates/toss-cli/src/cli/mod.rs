//! Command-line interface definitions and parsing.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use toss_types::TossPrediction;

/// Relays user-signed deposits and coin tosses to the toss game.
#[derive(Parser, Debug)]
#[command(name = "toss-operator")]
#[command(about = "Toss game operator - sign and relay deposits and coin tosses")]
#[command(version)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Commands,

	/// TOML configuration file; environment variables are used when absent
	#[arg(global = true, long, env = "TOSS_CONFIG")]
	pub config: Option<PathBuf>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(global = true, long, default_value = "info")]
	pub log_level: String,

	/// Token price in ether units, overriding the configured one
	#[arg(global = true, long)]
	pub token_price: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Deposit, ask for a prediction, then toss
	Play {
		/// Tokens to deposit
		#[arg(long, default_value = "10000")]
		deposit_amount: String,

		/// Tokens to wager on the toss
		#[arg(long, default_value = "100")]
		toss_amount: String,
	},

	/// Deposit tokens with a user-signed permit
	Deposit {
		/// Tokens to deposit
		#[arg(long)]
		amount: String,
	},

	/// Toss a coin with a user-signed message
	Toss {
		/// Tokens to wager
		#[arg(long)]
		amount: String,

		/// heads or tails; prompts when omitted
		#[arg(long)]
		prediction: Option<TossPrediction>,
	},

	/// Deposit and toss the same amount under one deadline
	DepositAndToss {
		/// Tokens to deposit and wager
		#[arg(long)]
		amount: String,

		/// heads or tails; prompts when omitted
		#[arg(long)]
		prediction: Option<TossPrediction>,
	},

	/// Show the EIP-712 domain separators of the token and the game
	Domain,
}
