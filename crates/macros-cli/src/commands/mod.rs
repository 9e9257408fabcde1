//! Command implementations for the BIDS macros CLI.
//!
//! Each command module renders one macro (or a family of closely related
//! macros) and prints the result in the requested format. The `render`
//! functions return the output without printing so they can be tested.

pub mod common;
pub mod completions;
pub mod filetree;
pub mod glossary;
pub mod invoke;
pub mod tables;
pub mod templates;
