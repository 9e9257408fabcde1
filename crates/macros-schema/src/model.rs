//! Schema data model.
//!
//! Mirrors the compiled JSON form of the specification schema. Only the
//! fields the renderers read are typed; everything else is preserved in
//! `extra` maps so that newer schema versions still load.

use crate::rules::{NamedRule, collect_rules};
use bids_macros_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Objects of one category, keyed by object name.
pub type Category = BTreeMap<String, SchemaObject>;

/// The loaded schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Version of the schema format.
    #[serde(default)]
    pub schema_version: Option<String>,

    /// Version of the specification the schema describes.
    #[serde(default)]
    pub bids_version: Option<String>,

    /// Object definitions by category (`entities`, `suffixes`, ...).
    #[serde(default)]
    pub objects: BTreeMap<String, Category>,

    /// Rules section.
    #[serde(default)]
    pub rules: Rules,

    #[serde(skip)]
    file_rules: Vec<NamedRule>,
}

/// The `rules` section of the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Canonical entity order, by entity key.
    #[serde(default)]
    pub entities: Vec<String>,

    /// Nested file rules. Any mapping carrying a `suffixes` key is a rule.
    #[serde(default)]
    pub files: Value,

    /// Rule kinds the renderers do not use.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A single schema object: an entity, suffix, metadata field, column, ...
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaObject {
    /// Short name as it appears in filenames or JSON keys (`sub`).
    #[serde(default)]
    pub name: Option<String>,

    /// Literal value for value-like objects (`T1w`, `.nii.gz`).
    #[serde(default)]
    pub value: Option<String>,

    /// Human-readable name.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Markdown description; may contain links to the source root.
    #[serde(default)]
    pub description: String,

    /// JSON type of the value (`string`, `number`, `array`, ...).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Value format for entities (`label`, `index`).
    #[serde(default)]
    pub format: Option<String>,

    /// Unit of a numeric value.
    #[serde(default)]
    pub unit: Option<String>,

    /// Allowed values.
    #[serde(default, rename = "enum")]
    pub enum_values: Option<Vec<Value>>,

    /// Element definition for arrays.
    #[serde(default)]
    pub items: Option<Box<SchemaObject>>,

    /// Alternative definitions.
    #[serde(default, rename = "anyOf")]
    pub any_of: Vec<SchemaObject>,

    /// Field definitions for objects.
    #[serde(default)]
    pub properties: BTreeMap<String, SchemaObject>,

    /// Anything else.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl SchemaObject {
    /// Name used in filenames, tables, and JSON: `name`, then `value`, then
    /// the object key.
    #[must_use]
    pub fn short_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.name
            .as_deref()
            .or(self.value.as_deref())
            .unwrap_or(key)
    }

    /// Human-readable name, falling back to the short name.
    #[must_use]
    pub fn display_name_or<'a>(&'a self, key: &'a str) -> &'a str {
        self.display_name
            .as_deref()
            .unwrap_or_else(|| self.short_name(key))
    }

    /// Describes the value type in words, for table cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use bids_macros_schema::SchemaObject;
    ///
    /// let field: SchemaObject = serde_json::from_str(
    ///     r#"{"type": "array", "items": {"type": "number"}, "unit": "s"}"#,
    /// )?;
    /// assert_eq!(field.data_type(), "array of numbers (unit: s)");
    /// # Ok::<(), serde_json::Error>(())
    /// ```
    #[must_use]
    pub fn data_type(&self) -> String {
        let base = self.base_type();
        match &self.unit {
            Some(unit) if !unit.is_empty() => format!("{base} (unit: {unit})"),
            _ => base,
        }
    }

    fn base_type(&self) -> String {
        if !self.any_of.is_empty() {
            let mut options: Vec<String> = Vec::new();
            for option in &self.any_of {
                let text = option.base_type();
                if !options.contains(&text) {
                    options.push(text);
                }
            }
            return options.join(" or ");
        }

        let kind = self.kind.as_deref().unwrap_or("any");

        if let Some(values) = self.enum_values.as_ref().filter(|v| !v.is_empty()) {
            let listed: Vec<String> = values.iter().map(|v| format!("`{}`", enum_label(v))).collect();
            return format!("{kind}; one of {}", listed.join(", "));
        }

        if kind == "array" {
            return match &self.items {
                Some(items) if items.kind.as_deref() == Some("array") => {
                    "array of arrays".to_string()
                }
                Some(items) => format!("array of {}s", items.base_type()),
                None => "array".to_string(),
            };
        }

        kind.to_string()
    }
}

fn enum_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Schema {
    /// Parses a schema from JSON text and indexes its file rules.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the text or any file rule has the
    /// wrong shape.
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        let schema: Self = serde_json::from_str(text)?;
        schema.indexed()
    }

    /// Builds a schema from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the value has the wrong shape.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        let schema: Self = serde_json::from_value(value)?;
        schema.indexed()
    }

    fn indexed(mut self) -> serde_json::Result<Self> {
        self.file_rules = collect_rules(&self.rules.files)?;
        Ok(self)
    }

    /// All file rules, in document order.
    #[must_use]
    pub fn file_rules(&self) -> &[NamedRule] {
        &self.file_rules
    }

    /// Objects of a category, if the schema defines it.
    #[must_use]
    pub fn category(&self, category: &str) -> Option<&Category> {
        self.objects.get(category)
    }

    /// Looks up one object.
    ///
    /// # Errors
    ///
    /// Returns `Error::ObjectNotFound` if the category or object is missing.
    pub fn object(&self, category: &str, name: &str) -> Result<&SchemaObject> {
        self.category(category)
            .and_then(|objects| objects.get(name))
            .ok_or_else(|| Error::ObjectNotFound {
                category: category.to_string(),
                name: name.to_string(),
            })
    }

    /// Looks up an object by a dotted path: a category, an object name,
    /// then property names (`["metadata", "Genetics", "Database"]`).
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for paths shorter than two segments
    /// and `Error::ObjectNotFound` for missing segments.
    pub fn object_at<S: AsRef<str>>(&self, path: &[S]) -> Result<&SchemaObject> {
        let [category, name, rest @ ..] = path else {
            return Err(Error::InvalidArgument(format!(
                "object path needs a category and a name, got {} segment(s)",
                path.len()
            )));
        };

        let mut current = self.object(category.as_ref(), name.as_ref())?;
        let mut parent = format!("{}.{}", category.as_ref(), name.as_ref());

        for segment in rest {
            let segment = segment.as_ref();
            current = current
                .properties
                .get(segment)
                .ok_or_else(|| Error::ObjectNotFound {
                    category: parent.clone(),
                    name: segment.to_string(),
                })?;
            parent = format!("{parent}.{segment}");
        }

        Ok(current)
    }

    /// Entity keys in canonical order.
    ///
    /// Uses `rules.entities` when present, otherwise the keys of
    /// `objects.entities`.
    #[must_use]
    pub fn entity_order(&self) -> Vec<&str> {
        if self.rules.entities.is_empty() {
            self.category("entities")
                .map(|entities| entities.keys().map(String::as_str).collect())
                .unwrap_or_default()
        } else {
            self.rules.entities.iter().map(String::as_str).collect()
        }
    }

    /// Resolves a user-supplied token to the canonical value of an object
    /// in `category`.
    ///
    /// A token matches an object by key or by `value`/`name`. Returns
    /// `None` if nothing matches.
    #[must_use]
    pub fn resolve_value(&self, category: &str, token: &str) -> Option<String> {
        let objects = self.category(category)?;

        if let Some(object) = objects.get(token) {
            return Some(object.short_name(token).to_string());
        }

        objects
            .iter()
            .find(|(key, object)| object.short_name(key) == token)
            .map(|_| token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::from_value(json!({
            "schema_version": "0.1.0",
            "objects": {
                "entities": {
                    "subject": {"name": "sub", "display_name": "Subject", "description": "A person.", "format": "label"},
                    "run": {"name": "run", "display_name": "Run", "description": "A run.", "format": "index"}
                },
                "extensions": {
                    "nii": {"value": ".nii", "description": "NIfTI"}
                },
                "metadata": {
                    "Genetics": {
                        "name": "Genetics",
                        "type": "object",
                        "description": "Genetic info.",
                        "properties": {
                            "Database": {"name": "Database", "type": "string", "description": "DB."}
                        }
                    }
                }
            },
            "rules": {"entities": ["subject", "run"]}
        }))
        .unwrap()
    }

    #[test]
    fn test_object_lookup() {
        let schema = schema();
        let subject = schema.object("entities", "subject").unwrap();
        assert_eq!(subject.short_name("subject"), "sub");
        assert_eq!(subject.display_name_or("subject"), "Subject");

        let err = schema.object("entities", "nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_object_at_nested() {
        let schema = schema();
        let db = schema
            .object_at(&["metadata", "Genetics", "Database"])
            .unwrap();
        assert_eq!(db.kind.as_deref(), Some("string"));

        let err = schema
            .object_at(&["metadata", "Genetics", "Missing"])
            .unwrap_err();
        assert_eq!(err.to_string(), "Schema object not found: metadata.Genetics.Missing");

        assert!(schema.object_at(&["metadata"]).is_err());
    }

    #[test]
    fn test_entity_order_from_rules() {
        assert_eq!(schema().entity_order(), ["subject", "run"]);
    }

    #[test]
    fn test_entity_order_fallback_to_objects() {
        let mut schema = schema();
        schema.rules.entities.clear();
        assert_eq!(schema.entity_order(), ["run", "subject"]);
    }

    #[test]
    fn test_resolve_value_by_key_and_value() {
        let schema = schema();
        assert_eq!(schema.resolve_value("extensions", "nii").as_deref(), Some(".nii"));
        assert_eq!(schema.resolve_value("extensions", ".nii").as_deref(), Some(".nii"));
        assert_eq!(schema.resolve_value("extensions", ".tsv"), None);
        assert_eq!(schema.resolve_value("nowhere", "x"), None);
    }

    #[test]
    fn test_data_type_descriptions() {
        let plain: SchemaObject = serde_json::from_value(json!({"type": "number"})).unwrap();
        assert_eq!(plain.data_type(), "number");

        let enumerated: SchemaObject =
            serde_json::from_value(json!({"type": "string", "enum": ["a", "b"]})).unwrap();
        assert_eq!(enumerated.data_type(), "string; one of `a`, `b`");

        let any_of: SchemaObject = serde_json::from_value(json!({
            "anyOf": [{"type": "string"}, {"type": "array", "items": {"type": "string"}}]
        }))
        .unwrap();
        assert_eq!(any_of.data_type(), "string or array of strings");

        let untyped = SchemaObject::default();
        assert_eq!(untyped.data_type(), "any");
    }

    #[test]
    fn test_unknown_fields_preserved() {
        let object: SchemaObject =
            serde_json::from_value(json!({"description": "x", "maximum": 10})).unwrap();
        assert_eq!(object.extra.get("maximum"), Some(&json!(10)));
    }
}
