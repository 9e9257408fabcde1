//! Suffix, metadata, sub-object, and column tables.

use crate::fields::FieldInfo;
use crate::markdown::{Links, Table};
use crate::template_engine::TemplateEngine;
use bids_macros_core::{Error, Result};
use bids_macros_schema::{Schema, SchemaObject};
use std::collections::BTreeMap;
use tracing::debug;

const FIELD_HEADERS: [&str; 4] = ["Key name", "Requirement Level", "Data type", "Description"];
const COLUMN_HEADERS: [&str; 4] = [
    "Column name",
    "Requirement Level",
    "Data type",
    "Description",
];

/// Finds an object by key, or by its `value`/`name`.
fn find_object<'a>(
    schema: &'a Schema,
    category: &str,
    token: &str,
) -> Result<(&'a str, &'a SchemaObject)> {
    let not_found = || Error::ObjectNotFound {
        category: category.to_string(),
        name: token.to_string(),
    };
    let objects = schema.category(category).ok_or_else(not_found)?;

    objects
        .get_key_value(token)
        .or_else(|| objects.iter().find(|(key, object)| object.short_name(key) == token))
        .map(|(key, object)| (key.as_str(), object))
        .ok_or_else(not_found)
}

/// Renders `Name | suffix | Description` for the given suffixes, in
/// request order.
pub(crate) fn render_suffix_table<S: AsRef<str>>(
    engine: &TemplateEngine<'_>,
    schema: &Schema,
    suffixes: &[S],
    links: Links<'_>,
) -> Result<String> {
    let mut table = Table::new(["Name", "suffix", "Description"]);

    for token in suffixes {
        let (key, suffix) = find_object(schema, "suffixes", token.as_ref())?;
        table.push_row([
            suffix.display_name_or(key).to_string(),
            suffix.short_name(key).to_string(),
            links.rewrite(&suffix.description),
        ]);
    }

    table.render(engine)
}

fn field_rows(
    table: &mut Table,
    objects: &BTreeMap<String, SchemaObject>,
    category: &str,
    field_info: &FieldInfo,
    links: Links<'_>,
) -> Result<()> {
    for (name, requirement) in field_info.iter() {
        let object = objects.get(name).ok_or_else(|| Error::ObjectNotFound {
            category: category.to_string(),
            name: name.to_string(),
        })?;

        let mut description = links.rewrite(object.description.trim());
        if let Some(note) = requirement.note() {
            description.push(' ');
            description.push_str(&links.rewrite(note.trim()));
        }

        table.push_row([
            object.short_name(name).to_string(),
            requirement.level().to_string(),
            object.data_type(),
            description,
        ]);
    }
    Ok(())
}

/// Renders the metadata table for the listed fields.
pub(crate) fn render_metadata_table(
    engine: &TemplateEngine<'_>,
    schema: &Schema,
    field_info: &FieldInfo,
    links: Links<'_>,
) -> Result<String> {
    let metadata = schema.category("metadata").ok_or_else(|| Error::ObjectNotFound {
        category: "objects".to_string(),
        name: "metadata".to_string(),
    })?;

    let mut table = Table::new(FIELD_HEADERS);
    field_rows(&mut table, metadata, "metadata", field_info, links)?;
    debug!("Metadata table with {} fields", field_info.len());
    table.render(engine)
}

/// Renders a metadata-style table over the properties of the object at
/// `object_path` (`metadata.Genetics`).
pub(crate) fn render_subobject_table(
    engine: &TemplateEngine<'_>,
    schema: &Schema,
    object_path: &str,
    field_info: &FieldInfo,
    links: Links<'_>,
) -> Result<String> {
    let segments: Vec<&str> = object_path.split('.').collect();
    let object = schema.object_at(segments.as_slice())?;

    if object.properties.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "schema object '{object_path}' has no properties"
        )));
    }

    let mut table = Table::new(FIELD_HEADERS);
    field_rows(&mut table, &object.properties, object_path, field_info, links)?;
    table.render(engine)
}

/// Renders the columns table for a tabular file.
pub(crate) fn render_columns_table(
    engine: &TemplateEngine<'_>,
    schema: &Schema,
    column_info: &FieldInfo,
    links: Links<'_>,
) -> Result<String> {
    let columns = schema.category("columns").ok_or_else(|| Error::ObjectNotFound {
        category: "objects".to_string(),
        name: "columns".to_string(),
    })?;

    let mut table = Table::new(COLUMN_HEADERS);
    field_rows(&mut table, columns, "columns", column_info, links)?;
    table.render(engine)
}
