//! Logging setup and helpers pairing terminal output with tracing.

use crate::cli::output::Display;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: &str) {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();
}

/// Reports a completed operation to the user and the log.
pub fn operation_success(operation: &str, message: &str) {
	Display::success(message);
	info!(operation = operation, "Operation completed successfully");
}

/// Reports a failed operation to the user and the log.
pub fn operation_error(operation: &str, error: &anyhow::Error) {
	Display::error(&format!("{} failed: {:#}", operation, error));
	error!(operation = operation, error = %error, "Operation failed");
}

/// Logs the start of an operation without terminal output.
pub fn operation_start(operation: &str, context: &str) {
	info!(operation = operation, context = context, "Operation started");
}
