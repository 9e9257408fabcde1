//! Entity table and entity definitions.

use crate::markdown::Table;
use crate::template_engine::TemplateEngine;
use bids_macros_core::{Result, SchemaFilter};
use bids_macros_schema::{NamedRule, Schema};
use serde::Serialize;
use tracing::debug;

/// How an entity appears in a filename: `sub-<label>`.
///
/// Falls back to the entity key and `label` when the schema does not
/// define the entity.
pub(crate) fn entity_pattern(schema: &Schema, key: &str) -> String {
    match schema.object("entities", key) {
        Ok(entity) => format!(
            "{}-<{}>",
            entity.short_name(key),
            entity.format.as_deref().unwrap_or("label")
        ),
        Err(_) => format!("{key}-<label>"),
    }
}

/// Entities used by `rules`, in canonical order, then any the order list
/// does not mention.
pub(crate) fn used_entities<'a>(schema: &'a Schema, rules: &[&'a NamedRule]) -> Vec<&'a str> {
    let mut used: Vec<&str> = schema
        .entity_order()
        .into_iter()
        .filter(|key| rules.iter().any(|r| r.rule.entities.contains_key(*key)))
        .collect();

    for rule in rules.iter().copied() {
        for key in rule.rule.entities.keys() {
            if !used.contains(&key.as_str()) {
                used.push(key.as_str());
            }
        }
    }
    used
}

fn rule_label(rule: &NamedRule) -> String {
    let datatypes = rule.rule.datatypes.join(", ");
    let suffixes = rule.rule.suffixes.join(", ");
    if datatypes.is_empty() {
        suffixes
    } else {
        format!("{datatypes} ({suffixes})")
    }
}

/// Renders the entity table for the rules matching `filter`.
///
/// One column per entity, a format row, then one row per rule with the
/// entity's requirement level.
pub(crate) fn render_entity_table(
    engine: &TemplateEngine<'_>,
    schema: &Schema,
    filter: &SchemaFilter,
) -> Result<String> {
    let rules = schema.select_rules(filter)?;
    let entities = used_entities(schema, &rules);
    debug!(
        "Entity table: {} rules, {} entities",
        rules.len(),
        entities.len()
    );

    let mut headers = vec!["Entity".to_string()];
    headers.extend(entities.iter().map(|key| {
        schema
            .object("entities", key)
            .map_or_else(|_| (*key).to_string(), |e| e.display_name_or(key).to_string())
    }));

    let mut table = Table::new(headers);

    let mut format_row = vec!["Format".to_string()];
    format_row.extend(
        entities
            .iter()
            .map(|key| format!("`{}`", entity_pattern(schema, key))),
    );
    table.push_row(format_row);

    for rule in rules {
        let mut row = vec![rule_label(rule)];
        row.extend(entities.iter().map(|key| {
            rule.rule
                .entities
                .get(*key)
                .map(|e| e.level().to_uppercase())
                .unwrap_or_default()
        }));
        table.push_row(row);
    }

    table.render(engine)
}

#[derive(Debug, Serialize)]
struct EntityDefinition {
    display_name: String,
    pattern: String,
    description: String,
}

/// Renders a `##` section for each entity, in canonical order.
pub(crate) fn render_entity_definitions(
    engine: &TemplateEngine<'_>,
    schema: &Schema,
) -> Result<String> {
    let entities = schema
        .entity_order()
        .into_iter()
        .map(|key| {
            let entity = schema.object("entities", key)?;
            Ok(EntityDefinition {
                display_name: entity.display_name_or(key).to_string(),
                pattern: entity_pattern(schema, key),
                description: entity.description.trim().to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    engine.render(
        "entity_definitions",
        &serde_json::json!({ "entities": entities }),
    )
}
