//! Glossary of every schema object.

use crate::entities::entity_pattern;
use crate::markdown::Links;
use crate::template_engine::TemplateEngine;
use bids_macros_core::Result;
use bids_macros_schema::{Schema, SchemaObject};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

#[derive(Debug, Serialize)]
struct GlossaryEntry {
    anchor: String,
    term: String,
    display_name: String,
    kind: String,
    data_type: Option<String>,
    description: String,
}

/// Singular, capitalized label for an object category.
fn category_label(category: &str) -> String {
    match category {
        "entities" => "Entity".to_string(),
        "metadata" => "Metadata".to_string(),
        "columns" => "Column".to_string(),
        "suffixes" => "Suffix".to_string(),
        other => {
            let singular = other.strip_suffix('s').unwrap_or(other);
            let mut chars = singular.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        }
    }
}

fn term(schema: &Schema, category: &str, key: &str, object: &SchemaObject) -> String {
    if category == "entities" {
        format!("`{}`", entity_pattern(schema, key))
    } else {
        format!("`{}`", object.short_name(key))
    }
}

/// Renders an anchored entry for every object, sorted by category then
/// key.
pub(crate) fn render_glossary(
    engine: &TemplateEngine<'_>,
    schema: &Schema,
    links: Links<'_>,
) -> Result<String> {
    let entries: Vec<GlossaryEntry> = schema
        .objects
        .iter()
        .flat_map(|(category, objects)| {
            objects.iter().map(move |(key, object)| GlossaryEntry {
                anchor: format!("objects.{category}.{key}"),
                term: term(schema, category, key, object),
                display_name: object.display_name_or(key).to_string(),
                kind: category_label(category),
                data_type: object.kind.is_some().then(|| object.data_type()),
                description: links.rewrite(object.description.trim()),
            })
        })
        .collect();

    debug!("Glossary with {} entries", entries.len());
    engine.render("glossary", &json!({ "entries": entries }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bids_macros_core::PagePath;

    fn schema() -> Schema {
        Schema::from_value(json!({
            "objects": {
                "suffixes": {
                    "bold": {"value": "bold", "display_name": "BOLD", "description": "See [x](SPEC_ROOT/x.md)."}
                },
                "entities": {
                    "subject": {"name": "sub", "display_name": "Subject", "format": "label", "description": "A participant."}
                },
                "metadata": {
                    "TaskName": {"name": "TaskName", "display_name": "Task Name", "type": "string", "description": "Task."}
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("entities"), "Entity");
        assert_eq!(category_label("suffixes"), "Suffix");
        assert_eq!(category_label("datatypes"), "Datatype");
        assert_eq!(category_label("columns"), "Column");
        assert_eq!(category_label(""), "");
    }

    #[test]
    fn test_glossary_sorted_by_category_then_key() {
        let engine = TemplateEngine::new().unwrap();
        let page = PagePath::new("appendices/glossary.md").unwrap();
        let text = render_glossary(&engine, &schema(), Links::new(&page, "SPEC_ROOT")).unwrap();

        let entities = text.find("objects.entities.subject").unwrap();
        let metadata = text.find("objects.metadata.TaskName").unwrap();
        let suffixes = text.find("objects.suffixes.bold").unwrap();
        assert!(entities < metadata && metadata < suffixes);
    }

    #[test]
    fn test_glossary_entry_shape() {
        let engine = TemplateEngine::new().unwrap();
        let page = PagePath::new("appendices/glossary.md").unwrap();
        let text = render_glossary(&engine, &schema(), Links::new(&page, "SPEC_ROOT")).unwrap();

        assert!(text.starts_with(
            "<a name=\"objects.entities.subject\"></a>\n## `sub-<label>`\n\n**Name**: Subject"
        ));
        assert!(text.contains("**Data type**: string"));
        assert!(text.contains("See [x](../x.md)."));
        // Only typed objects get a data type line
        assert_eq!(text.matches("**Data type**").count(), 1);
    }
}
