//! Utility functions for amount conversion and deadlines.

pub mod builders;
pub mod conversion;
pub mod helpers;

pub use conversion::{format_token_amount, parse_token_amount, ConversionError};
pub use helpers::{current_timestamp, deadline_from_now};
