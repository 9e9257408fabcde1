//! The macro provider: one object per documentation build.
//!
//! `MacroProvider` owns the schema handle, the template engine, and the
//! configuration. Every macro a page can call is a method; link-sensitive
//! macros take the calling page explicitly.
//!
//! # Examples
//!
//! ```
//! use bids_macros_core::MacroConfig;
//! use bids_macros_render::{MacroCall, MacroProvider};
//! use bids_macros_schema::Schema;
//! use serde_json::json;
//!
//! let schema = Schema::from_json_str(r#"{"objects": {}}"#)?;
//! let provider = MacroProvider::with_schema(schema, MacroConfig::default())?;
//!
//! let call: MacroCall = serde_json::from_value(json!({
//!     "macro": "make_filetree_example",
//!     "filetree_info": {"sub1": {"file.txt": ""}}
//! }))?;
//! assert_eq!(provider.invoke(&call, None)?, "└── sub1\n    └── file.txt");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::entities::{render_entity_definitions, render_entity_table};
use crate::fields::FieldInfo;
use crate::filename_template::render_filename_template;
use crate::glossary::render_glossary;
use crate::markdown::Links;
use crate::tables::{
    render_columns_table, render_metadata_table, render_subobject_table, render_suffix_table,
};
use crate::template_engine::TemplateEngine;
use bids_macros_core::{Error, MacroConfig, PagePath, Result, SchemaFilter};
use bids_macros_filetree::{DirectoryTree, TreeError};
use bids_macros_schema::{Schema, SchemaHandle};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// One macro invocation, as written in a page or passed to the CLI.
///
/// The `macro` field selects the variant; the remaining fields are the
/// macro's arguments. Unknown fields are rejected.
///
/// ```json
/// {"macro": "make_suffix_table", "suffixes": ["T1w", "T2w"]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "macro", rename_all = "snake_case", deny_unknown_fields)]
pub enum MacroCall {
    /// Directory layout and filename patterns.
    MakeFilenameTemplate {
        /// Rules to include.
        #[serde(default)]
        filter: SchemaFilter,
    },
    /// Entity requirement table.
    MakeEntityTable {
        /// Rules to include.
        #[serde(default)]
        filter: SchemaFilter,
    },
    /// Definitions of all entities.
    MakeEntityDefinitions,
    /// Glossary of every schema object.
    MakeGlossary,
    /// Table of suffixes.
    MakeSuffixTable {
        /// Suffixes in display order.
        suffixes: Vec<String>,
    },
    /// Table of metadata fields.
    MakeMetadataTable {
        /// Fields and requirement levels in display order.
        field_info: FieldInfo,
    },
    /// Table of the fields of a metadata object.
    MakeSubobjectTable {
        /// Dotted path to the object, e.g. `metadata.Genetics`.
        object_path: String,
        /// Fields and requirement levels in display order.
        field_info: FieldInfo,
    },
    /// Table of TSV columns.
    MakeColumnsTable {
        /// Columns and requirement levels in display order.
        column_info: FieldInfo,
    },
    /// Directory tree drawing.
    MakeFiletreeExample {
        /// Directory description.
        filetree_info: Value,
        /// Overrides the configured connector style.
        #[serde(default)]
        use_pipe: Option<bool>,
    },
}

impl MacroCall {
    /// Macro name as written in pages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MakeFilenameTemplate { .. } => "make_filename_template",
            Self::MakeEntityTable { .. } => "make_entity_table",
            Self::MakeEntityDefinitions => "make_entity_definitions",
            Self::MakeGlossary => "make_glossary",
            Self::MakeSuffixTable { .. } => "make_suffix_table",
            Self::MakeMetadataTable { .. } => "make_metadata_table",
            Self::MakeSubobjectTable { .. } => "make_subobject_table",
            Self::MakeColumnsTable { .. } => "make_columns_table",
            Self::MakeFiletreeExample { .. } => "make_filetree_example",
        }
    }

    /// Returns `true` if the macro rewrites links and so needs the calling
    /// page.
    #[must_use]
    pub const fn needs_page(&self) -> bool {
        matches!(
            self,
            Self::MakeGlossary
                | Self::MakeSuffixTable { .. }
                | Self::MakeMetadataTable { .. }
                | Self::MakeSubobjectTable { .. }
                | Self::MakeColumnsTable { .. }
        )
    }
}

fn tree_error(error: TreeError) -> Error {
    let reason = match &error {
        TreeError::UnexpectedValue { found, .. } => {
            format!("expected null, string, mapping, or sequence, found {found}")
        }
        TreeError::InvalidRoot { found } => {
            format!("top level must be a mapping or sequence, found {found}")
        }
        TreeError::InvalidName { reason, .. } => (*reason).to_string(),
    };
    Error::MalformedTree {
        path: error.path().to_string(),
        reason,
    }
}

/// Renders Markdown snippets from the schema for documentation pages.
#[derive(Debug)]
pub struct MacroProvider {
    handle: SchemaHandle,
    engine: TemplateEngine<'static>,
    config: MacroConfig,
}

impl MacroProvider {
    /// Loads the schema named by `config` and prepares the templates.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the schema cannot
    /// be loaded, or a built-in template fails to compile.
    pub fn new(config: MacroConfig) -> Result<Self> {
        config.validate()?;
        let handle = SchemaHandle::open(config.schema_path.clone())?;
        Self::from_handle(handle, config)
    }

    /// Uses an already-loaded schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a built-in
    /// template fails to compile.
    pub fn with_schema(schema: Schema, config: MacroConfig) -> Result<Self> {
        config.validate()?;
        Self::from_handle(SchemaHandle::from_schema(schema), config)
    }

    fn from_handle(handle: SchemaHandle, config: MacroConfig) -> Result<Self> {
        Ok(Self {
            handle,
            engine: TemplateEngine::new()?,
            config,
        })
    }

    /// Current schema snapshot.
    #[must_use]
    pub fn schema(&self) -> Arc<Schema> {
        self.handle.schema()
    }

    /// The schema handle.
    #[must_use]
    pub const fn handle(&self) -> &SchemaHandle {
        &self.handle
    }

    /// The configuration the provider was built with.
    #[must_use]
    pub const fn config(&self) -> &MacroConfig {
        &self.config
    }

    /// Re-reads the schema from disk.
    ///
    /// # Errors
    ///
    /// Returns the loader error; the previous schema stays in use.
    pub fn reload(&mut self) -> Result<()> {
        self.handle.reload()
    }

    fn links<'a>(&'a self, page: &'a PagePath) -> Links<'a> {
        Links::new(page, &self.config.link_root_token)
    }

    /// Directory layout and filename patterns for the rules matching
    /// `filter`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownFilterValue` for filter values the schema does
    /// not define.
    pub fn make_filename_template(&self, filter: &SchemaFilter) -> Result<String> {
        render_filename_template(&self.engine, self.handle.get(), filter)
    }

    /// Entity requirement table for the rules matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownFilterValue` for filter values the schema does
    /// not define.
    pub fn make_entity_table(&self, filter: &SchemaFilter) -> Result<String> {
        render_entity_table(&self.engine, self.handle.get(), filter)
    }

    /// A definition section per entity.
    ///
    /// # Errors
    ///
    /// Returns `Error::ObjectNotFound` if the entity order names an entity
    /// without a definition.
    pub fn make_entity_definitions(&self) -> Result<String> {
        render_entity_definitions(&self.engine, self.handle.get())
    }

    /// Glossary of every schema object, with links relative to `page`.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateError` if rendering fails.
    pub fn make_glossary(&self, page: &PagePath) -> Result<String> {
        render_glossary(&self.engine, self.handle.get(), self.links(page))
    }

    /// Table of the given suffixes.
    ///
    /// # Errors
    ///
    /// Returns `Error::ObjectNotFound` for an unknown suffix.
    pub fn make_suffix_table<S: AsRef<str>>(&self, suffixes: &[S], page: &PagePath) -> Result<String> {
        render_suffix_table(&self.engine, self.handle.get(), suffixes, self.links(page))
    }

    /// Table of metadata fields.
    ///
    /// # Errors
    ///
    /// Returns `Error::ObjectNotFound` for an unknown field.
    pub fn make_metadata_table(&self, field_info: &FieldInfo, page: &PagePath) -> Result<String> {
        render_metadata_table(&self.engine, self.handle.get(), field_info, self.links(page))
    }

    /// Table of the fields of the object at `object_path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ObjectNotFound` if the object or a field is missing,
    /// and `Error::InvalidArgument` if the object has no fields.
    pub fn make_subobject_table(
        &self,
        object_path: &str,
        field_info: &FieldInfo,
        page: &PagePath,
    ) -> Result<String> {
        render_subobject_table(
            &self.engine,
            self.handle.get(),
            object_path,
            field_info,
            self.links(page),
        )
    }

    /// Table of TSV columns.
    ///
    /// # Errors
    ///
    /// Returns `Error::ObjectNotFound` for an unknown column.
    pub fn make_columns_table(&self, column_info: &FieldInfo, page: &PagePath) -> Result<String> {
        render_columns_table(&self.engine, self.handle.get(), column_info, self.links(page))
    }

    /// Draws a directory tree.
    ///
    /// `use_pipe` overrides the configured connector style.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedTree` naming the offending node.
    pub fn make_filetree_example(
        &self,
        filetree_info: &Value,
        use_pipe: Option<bool>,
    ) -> Result<String> {
        let use_pipe = use_pipe.unwrap_or(self.config.filetree.use_pipe);
        let tree = DirectoryTree::from_json(filetree_info, use_pipe)
            .map_err(tree_error)?
            .mark_directories(self.config.filetree.mark_directories);
        Ok(tree.generate())
    }

    /// Dispatches a macro call.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the macro rewrites links and no
    /// page was given, otherwise the macro's own errors.
    pub fn invoke(&self, call: &MacroCall, page: Option<&PagePath>) -> Result<String> {
        debug!("Invoking {}", call.name());

        match (call, page) {
            (MacroCall::MakeFilenameTemplate { filter }, _) => self.make_filename_template(filter),
            (MacroCall::MakeEntityTable { filter }, _) => self.make_entity_table(filter),
            (MacroCall::MakeEntityDefinitions, _) => self.make_entity_definitions(),
            (MacroCall::MakeFiletreeExample { filetree_info, use_pipe }, _) => {
                self.make_filetree_example(filetree_info, *use_pipe)
            }
            (MacroCall::MakeGlossary, Some(page)) => self.make_glossary(page),
            (MacroCall::MakeSuffixTable { suffixes }, Some(page)) => {
                self.make_suffix_table(suffixes, page)
            }
            (MacroCall::MakeMetadataTable { field_info }, Some(page)) => {
                self.make_metadata_table(field_info, page)
            }
            (
                MacroCall::MakeSubobjectTable {
                    object_path,
                    field_info,
                },
                Some(page),
            ) => self.make_subobject_table(object_path, field_info, page),
            (MacroCall::MakeColumnsTable { column_info }, Some(page)) => {
                self.make_columns_table(column_info, page)
            }
            (call, None) => Err(Error::InvalidArgument(format!(
                "{} needs the path of the calling page",
                call.name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> MacroProvider {
        let schema = Schema::from_value(json!({
            "objects": {
                "suffixes": {"T1w": {"value": "T1w", "display_name": "T1w image", "description": "See SPEC_ROOT/a.md."}}
            }
        }))
        .unwrap();
        MacroProvider::with_schema(schema, MacroConfig::default()).unwrap()
    }

    #[test]
    fn test_macro_call_parsing() {
        let call: MacroCall = serde_json::from_value(json!({
            "macro": "make_suffix_table",
            "suffixes": ["T1w"]
        }))
        .unwrap();
        assert_eq!(call.name(), "make_suffix_table");
        assert!(call.needs_page());

        let call: MacroCall =
            serde_json::from_value(json!({"macro": "make_entity_definitions"})).unwrap();
        assert_eq!(call, MacroCall::MakeEntityDefinitions);
        assert!(!call.needs_page());
    }

    #[test]
    fn test_macro_call_rejects_unknown_fields() {
        let result: std::result::Result<MacroCall, _> = serde_json::from_value(json!({
            "macro": "make_entity_table",
            "filter": {"datatype": ["anat"]}
        }));
        assert!(result.is_err());

        let result: std::result::Result<MacroCall, _> =
            serde_json::from_value(json!({"macro": "make_everything"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_invoke_requires_page_for_links() {
        let provider = provider();
        let call = MacroCall::MakeSuffixTable {
            suffixes: vec!["T1w".to_string()],
        };
        let err = provider.invoke(&call, None).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let page = PagePath::new("a/b.md").unwrap();
        let text = provider.invoke(&call, Some(&page)).unwrap();
        assert!(text.contains("See ../a.md."));
    }

    #[test]
    fn test_filetree_uses_config_defaults() {
        let schema = Schema::default();
        let mut config = MacroConfig::default();
        config.filetree.use_pipe = false;
        config.filetree.mark_directories = true;
        let provider = MacroProvider::with_schema(schema, config).unwrap();

        let info = json!({"sub-01": {"anat": {}}});
        assert_eq!(
            provider.make_filetree_example(&info, None).unwrap(),
            "`-- sub-01/\n    `-- anat/"
        );
        assert_eq!(
            provider.make_filetree_example(&info, Some(true)).unwrap(),
            "└── sub-01/\n    └── anat/"
        );
    }

    #[test]
    fn test_filetree_malformed_maps_to_error() {
        let provider = provider();
        let err = provider
            .make_filetree_example(&json!({"sub-01": 7}), None)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedTree { ref path, .. } if path == "sub-01"));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MacroConfig {
            link_root_token: String::new(),
            ..MacroConfig::default()
        };
        let err = MacroProvider::with_schema(Schema::default(), config).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MacroProvider>();
    }
}
