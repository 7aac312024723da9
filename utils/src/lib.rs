//! Shared utilities for the Warden bot.

pub mod format;
pub mod logging;

pub use format::{format_amount, format_duration};
pub use logging::{init_logging, LogFormat};
