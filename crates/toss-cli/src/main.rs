//! Main binary entry point for the toss game operator.

use anyhow::Result;
use clap::Parser;
use toss_cli::{cli::Cli, commands, logging};

#[tokio::main]
async fn main() -> Result<()> {
	// Load environment variables from .env file if it exists
	let _ = dotenvy::dotenv();

	let cli = Cli::parse();
	logging::init_logging(&cli.log_level);

	let operation = command_name(&cli);
	tracing::info!(command = operation, "Started toss operator");

	if let Err(e) = commands::run(cli).await {
		logging::operation_error(operation, &e);
		return Err(e);
	}
	Ok(())
}

fn command_name(cli: &Cli) -> &'static str {
	use toss_cli::cli::Commands;

	match cli.command {
		Commands::Play { .. } => "play",
		Commands::Deposit { .. } => "deposit",
		Commands::Toss { .. } => "toss",
		Commands::DepositAndToss { .. } => "deposit-and-toss",
		Commands::Domain => "domain",
	}
}
