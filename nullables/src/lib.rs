//! Nullable infrastructure for deterministic testing.
//!
//! Every external collaborator of the bot (the chat gateway, the reply
//! channel of an interaction, the blockchain explorer) sits behind a trait.
//! This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be configured programmatically
//! - Record every side effect for later assertions
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod explorer;
pub mod platform;
pub mod responder;

pub use explorer::NullExplorer;
pub use platform::NullPlatform;
pub use responder::{NullResponder, Response};
