//! Filename templates.
//!
//! Renders the directory layout and filename patterns of the rules matching
//! a filter:
//!
//! ```text
//! sub-<label>/
//!     [ses-<label>/]
//!         anat/
//!             sub-<label>[_ses-<label>][_run-<index>]_<T1w|T2w><.nii.gz|.nii|.json>
//! ```
//!
//! Rules without a datatype are listed under the session level, before
//! the datatype directories.

use crate::entities::{entity_pattern, used_entities};
use crate::template_engine::TemplateEngine;
use bids_macros_core::{FilterKey, Result, SchemaFilter};
use bids_macros_schema::{NamedRule, Schema};
use serde_json::json;
use tracing::debug;

const INDENT: &str = "    ";

/// `<a|b>` for alternatives, the bare value when there is only one.
fn alternatives(values: &[&str]) -> String {
    match values {
        [] => String::new(),
        [single] => (*single).to_string(),
        many => format!("<{}>", many.join("|")),
    }
}

/// Values of a rule, narrowed to the filter's values for `key` when the
/// filter constrains it.
fn narrowed<'a>(rule_values: &'a [String], wanted: &[String]) -> Vec<&'a str> {
    rule_values
        .iter()
        .filter(|v| wanted.is_empty() || wanted.contains(v))
        .map(String::as_str)
        .collect()
}

fn resolved(schema: &Schema, filter: &SchemaFilter, key: FilterKey) -> Vec<String> {
    filter
        .values(key)
        .iter()
        .filter_map(|v| schema.resolve_value(key.as_str(), v))
        .collect()
}

/// Filename pattern for one rule.
fn filename_pattern(
    schema: &Schema,
    rule: &NamedRule,
    suffixes: &[String],
    extensions: &[String],
) -> String {
    let mut name = String::new();

    for key in used_entities(schema, &[rule]) {
        let Some(level) = rule.rule.entities.get(key) else {
            continue;
        };
        let separator = if name.is_empty() { "" } else { "_" };
        let part = entity_pattern(schema, key);
        if level.is_required() {
            name.push_str(separator);
            name.push_str(&part);
        } else {
            name.push('[');
            name.push_str(separator);
            name.push_str(&part);
            name.push(']');
        }
    }

    let suffix = alternatives(&narrowed(&rule.rule.suffixes, suffixes));
    if !suffix.is_empty() {
        if !name.is_empty() {
            name.push('_');
        }
        name.push_str(&suffix);
    }

    name.push_str(&alternatives(&narrowed(&rule.rule.extensions, extensions)));
    name
}

fn directory_label(schema: &Schema, key: &str) -> String {
    format!("{}/", entity_pattern(schema, key))
}

/// Renders the filename template block for the rules matching `filter`.
pub(crate) fn render_filename_template(
    engine: &TemplateEngine<'_>,
    schema: &Schema,
    filter: &SchemaFilter,
) -> Result<String> {
    let rules = schema.select_rules(filter)?;
    let suffixes = resolved(schema, filter, FilterKey::Suffixes);
    let extensions = resolved(schema, filter, FilterKey::Extensions);
    let datatype_filter = resolved(schema, filter, FilterKey::Datatypes);

    let mut lines = vec![directory_label(schema, "subject")];
    lines.push(format!("{INDENT}[{}]", directory_label(schema, "session")));

    let mut datatypes: Vec<&str> = Vec::new();
    for rule in &rules {
        for datatype in narrowed(&rule.rule.datatypes, &datatype_filter) {
            if !datatypes.contains(&datatype) {
                datatypes.push(datatype);
            }
        }
    }

    // Rules without a datatype describe files next to the datatype
    // directories (`scans.tsv`).
    let mut seen: Vec<String> = Vec::new();
    for rule in rules.iter().filter(|r| r.rule.datatypes.is_empty()) {
        let pattern = filename_pattern(schema, rule, &suffixes, &extensions);
        if !seen.contains(&pattern) {
            lines.push(format!("{INDENT}{INDENT}{pattern}"));
            seen.push(pattern);
        }
    }

    for datatype in &datatypes {
        lines.push(format!("{INDENT}{INDENT}{datatype}/"));
        let mut seen: Vec<String> = Vec::new();
        for rule in rules
            .iter()
            .filter(|r| r.rule.datatypes.iter().any(|d| d == datatype))
        {
            let pattern = filename_pattern(schema, rule, &suffixes, &extensions);
            if !seen.contains(&pattern) {
                lines.push(format!("{INDENT}{INDENT}{INDENT}{pattern}"));
                seen.push(pattern);
            }
        }
    }

    debug!(
        "Filename template: {} rules across {} datatypes",
        rules.len(),
        datatypes.len()
    );

    engine.render("filename_template", &json!({ "lines": lines }))
}
