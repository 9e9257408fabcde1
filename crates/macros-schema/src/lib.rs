//! Schema model, loading, and rule selection for the documentation macros.
//!
//! # Architecture
//!
//! - `model` - Typed view of the compiled JSON schema
//! - `rules` - File rules and filter-based selection
//! - `handle` - Loader and the cached, reloadable `SchemaHandle`

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod handle;
mod model;
mod rules;

pub use handle::{SchemaHandle, load_schema};
pub use model::{Category, Rules, Schema, SchemaObject};
pub use rules::{EntityRule, FileRule, NamedRule};
