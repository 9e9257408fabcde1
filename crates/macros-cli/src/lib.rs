//! BIDS macros CLI library.
//!
//! Exposes the argument definitions, commands, and formatters of the
//! `bids-macros` binary so they can be tested without spawning it.

#![allow(clippy::format_push_string)]

pub mod cli;
pub mod commands;
pub mod formatters;

pub use cli::{Cli, Commands, ConnectorArgs, FilterArgs};
pub use commands::common::Globals;
