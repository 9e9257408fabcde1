//! Directory-tree rendering for documentation examples.
//!
//! Turns a nested directory description into a `tree`-style drawing that a
//! documentation page embeds in a preformatted block.
//!
//! # Architecture
//!
//! - `types` - Directory description model and JSON parser
//! - `tree` - The renderer itself
//! - `builder` - Fluent construction from code

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod builder;
pub mod tree;
pub mod types;

pub use builder::DirectoryTreeBuilder;
pub use tree::{DirectoryTree, Glyphs, render_tree};
pub use types::{DirectoryEntry, EntryKind, Result, TreeError, parse_entries};
