//! Markdown renderers and the macro provider for BIDS documentation pages.
//!
//! Each macro turns a piece of the schema into a Markdown snippet that the
//! documentation build splices into a page.
//!
//! # Architecture
//!
//! - `template_engine` - Handlebars wrapper with the built-in templates
//! - `markdown` - Table building and cell escaping
//! - `fields` - Requirement levels for metadata and column tables
//! - `entities`, `filename_template`, `glossary`, `tables` - One renderer
//!   per macro family
//! - `provider` - `MacroProvider`, the entry point used by the build and
//!   the CLI
//!
//! # Examples
//!
//! ```
//! use bids_macros_core::{MacroConfig, PagePath};
//! use bids_macros_render::MacroProvider;
//! use bids_macros_schema::Schema;
//!
//! let schema = Schema::from_json_str(r#"{
//!     "objects": {"suffixes": {"T1w": {
//!         "value": "T1w",
//!         "display_name": "T1-weighted image",
//!         "description": "See [MRI](SPEC_ROOT/mri.md)."
//!     }}}
//! }"#)?;
//! let provider = MacroProvider::with_schema(schema, MacroConfig::default())?;
//! let page = PagePath::new("modality-specific-files/anat.md")?;
//!
//! let table = provider.make_suffix_table(&["T1w"], &page)?;
//! assert!(table.ends_with("| T1-weighted image | T1w | See [MRI](../mri.md). |"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod entities;
mod fields;
mod filename_template;
mod glossary;
mod markdown;
mod provider;
mod tables;
mod template_engine;

pub use fields::{FieldInfo, FieldRequirement};
pub use markdown::escape_cell;
pub use provider::{MacroCall, MacroProvider};
pub use template_engine::TemplateEngine;
