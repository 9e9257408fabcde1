//! Core types, configuration, and errors for the BIDS documentation macros.
//!
//! This crate provides the foundational types shared by every other crate
//! in the workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - Error hierarchy with contextual information
//! - `MacroConfig`, loaded from TOML once per documentation build
//! - `PagePath`, the explicit page context for link rewriting
//! - `SchemaFilter`, the recognized filter keys for table macros
//! - CLI strong types (`OutputFormat`, `ExitCode`)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod filter;
mod page;

pub mod cli;

pub use config::{
    CONFIG_FILE_NAME, DEFAULT_LINK_ROOT_TOKEN, DEFAULT_SCHEMA_PATH, FiletreeConfig, MacroConfig,
    user_config_path,
};
pub use error::{Error, Result};
pub use filter::{FilterKey, SchemaFilter};
pub use page::PagePath;
