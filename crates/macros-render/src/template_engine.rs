//! Template engine for Markdown generation using Handlebars.
//!
//! Wraps Handlebars with the built-in Markdown templates registered. The
//! engine runs in strict mode and never HTML-escapes: every macro emits
//! Markdown, and cell escaping is done by the renderers themselves.
//!
//! # Examples
//!
//! ```
//! use bids_macros_render::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new()?;
//! let table = engine.render(
//!     "table",
//!     &json!({"headers": ["Name", "Value"], "rows": [["a", "1"]]}),
//! )?;
//! assert_eq!(table, "| Name | Value |\n| --- | --- |\n| a | 1 |");
//! # Ok::<(), bids_macros_core::Error>(())
//! ```

use bids_macros_core::{Error, Result};
use handlebars::Handlebars;
use serde::Serialize;

/// Built-in templates, by registered name.
const BUILTIN_TEMPLATES: [(&str, &str); 4] = [
    ("table", include_str!("../templates/table.md.hbs")),
    (
        "filename_template",
        include_str!("../templates/filename_template.md.hbs"),
    ),
    (
        "entity_definitions",
        include_str!("../templates/entity_definitions.md.hbs"),
    ),
    ("glossary", include_str!("../templates/glossary.md.hbs")),
];

/// Template engine for Markdown snippets.
///
/// This type is `Send` and `Sync`; one engine serves a whole documentation
/// build.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateEngine<'_> {
    /// Creates a new engine with the built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateError` if a built-in template fails to
    /// compile.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        for (name, template) in BUILTIN_TEMPLATES {
            handlebars
                .register_template_string(name, template)
                .map_err(|e| Error::TemplateError {
                    message: format!("Failed to register template '{name}': {e}"),
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Renders a template with the given context.
    ///
    /// Trailing whitespace is trimmed so that snippets can be embedded
    /// without stray blank lines.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateError` if the template is not registered,
    /// the context cannot be serialized, or a referenced field is missing.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map(|text| text.trim_end().to_string())
            .map_err(|e| Error::TemplateError {
                message: format!("Template '{template_name}' failed to render: {e}"),
            })
    }

    /// Registers an additional template, or replaces a built-in one.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateError` if the template string is invalid.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::TemplateError {
                message: format!("Failed to register template '{name}': {e}"),
            })
    }

    /// Returns `true` if a template with this name is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}
