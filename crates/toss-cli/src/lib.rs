//! Command-line operator for the toss game.
//!
//! Loads configuration from `.env`, the environment or a TOML file, builds a
//! [`toss_core::TossGameOperator`] and relays the player's signed deposit and
//! toss transactions.

pub mod cli;
pub mod commands;
pub mod logging;
