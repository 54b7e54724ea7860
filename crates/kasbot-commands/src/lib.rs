//! # kasbot-commands
//!
//! Discord slash commands for kasbot using the Poise framework: the five
//! user-facing commands, the per-user cooldown tracker, reply-payload
//! assembly, and the framework wiring that ties dispatch, cooldown gating,
//! and error reporting together.

#![warn(clippy::all)]

pub mod balance;
pub mod chain;
pub mod context;
pub mod cooldown;
pub mod exchanges;
pub mod framework;
pub mod market;
pub mod price;
pub mod reply;

pub use context::{CommandError, Context, Data};
pub use cooldown::{CooldownTracker, COOLDOWN_WINDOW};
pub use framework::create_framework;
