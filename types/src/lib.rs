//! Fundamental types for the Warden bot.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: opaque platform identifiers and timestamps.

pub mod error;
pub mod ids;
pub mod time;

pub use error::WardenError;
pub use ids::{GuildId, RoleId, UserId};
pub use time::Timestamp;
