//! File rules and filter-based rule selection.
//!
//! File rules describe which entities, suffixes, and extensions a family of
//! files may use. They live at varying depths under `rules.files`; any
//! mapping with a `suffixes` key is treated as a rule and named by its
//! dotted path (`raw.anat.nonparametric`).

use crate::model::Schema;
use bids_macros_core::{Error, FilterKey, Result, SchemaFilter};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Requirement level of an entity in a file rule.
///
/// Accepts both `"required"` and `{"level": "required", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRule {
    /// Bare level string.
    Level(String),
    /// Level with extra constraints.
    Detailed {
        /// Requirement level.
        level: String,
        /// Allowed values, if restricted.
        #[serde(default, rename = "enum")]
        enum_values: Option<Vec<String>>,
    },
}

impl EntityRule {
    /// Requirement level, lower-cased as written in the schema.
    #[must_use]
    pub fn level(&self) -> &str {
        match self {
            Self::Level(level) | Self::Detailed { level, .. } => level,
        }
    }

    /// Returns `true` if the entity must appear in the filename.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.level().eq_ignore_ascii_case("required")
    }
}

/// One file rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileRule {
    /// Allowed suffixes.
    #[serde(default)]
    pub suffixes: Vec<String>,

    /// Allowed extensions.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Datatypes (directories) the files live in.
    #[serde(default)]
    pub datatypes: Vec<String>,

    /// Entities and their requirement levels.
    #[serde(default)]
    pub entities: BTreeMap<String, EntityRule>,
}

impl FileRule {
    fn values(&self, key: FilterKey) -> &[String] {
        match key {
            FilterKey::Datatypes => &self.datatypes,
            FilterKey::Suffixes => &self.suffixes,
            FilterKey::Extensions => &self.extensions,
        }
    }
}

/// A file rule with its dotted location under `rules.files`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedRule {
    /// Dotted path, e.g. `raw.anat.nonparametric`.
    pub path: String,
    /// The rule.
    pub rule: FileRule,
}

/// Walks `rules.files` and collects every rule in document order.
pub(crate) fn collect_rules(files: &Value) -> serde_json::Result<Vec<NamedRule>> {
    let mut rules = Vec::new();
    walk(files, &mut Vec::new(), &mut rules)?;
    Ok(rules)
}

fn walk(value: &Value, path: &mut Vec<String>, out: &mut Vec<NamedRule>) -> serde_json::Result<()> {
    let Value::Object(map) = value else {
        return Ok(());
    };

    if map.contains_key("suffixes") {
        let rule: FileRule = serde_json::from_value(value.clone())?;
        out.push(NamedRule {
            path: path.join("."),
            rule,
        });
        return Ok(());
    }

    for (key, child) in map {
        path.push(key.clone());
        walk(child, path, out)?;
        path.pop();
    }

    Ok(())
}

impl Schema {
    /// Checks every filter value against the schema's objects.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownFilterValue` for the first value that names
    /// no datatype, suffix, or extension.
    pub fn validate_filter(&self, filter: &SchemaFilter) -> Result<()> {
        for key in FilterKey::ALL {
            for value in filter.values(key) {
                if self.resolve_value(key.as_str(), value).is_none() {
                    return Err(Error::UnknownFilterValue {
                        key: key.as_str().to_string(),
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns the file rules matching `filter`, in document order.
    ///
    /// A rule matches when, for every non-empty filter list, it shares at
    /// least one value with that list. An empty filter matches every rule.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownFilterValue` if the filter names something the
    /// schema does not define.
    pub fn select_rules(&self, filter: &SchemaFilter) -> Result<Vec<&NamedRule>> {
        self.validate_filter(filter)?;

        let wanted: Vec<(FilterKey, Vec<String>)> = FilterKey::ALL
            .into_iter()
            .filter(|key| !filter.values(*key).is_empty())
            .map(|key| {
                let values = filter
                    .values(key)
                    .iter()
                    .filter_map(|v| self.resolve_value(key.as_str(), v))
                    .collect();
                (key, values)
            })
            .collect();

        let selected: Vec<&NamedRule> = self
            .file_rules()
            .iter()
            .filter(|named| {
                wanted.iter().all(|(key, values)| {
                    named
                        .rule
                        .values(*key)
                        .iter()
                        .any(|v| values.contains(v))
                })
            })
            .collect();

        debug!(
            "Selected {} of {} file rules",
            selected.len(),
            self.file_rules().len()
        );
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::from_value(json!({
            "objects": {
                "datatypes": {
                    "anat": {"value": "anat"},
                    "func": {"value": "func"}
                },
                "suffixes": {
                    "T1w": {"value": "T1w"},
                    "T2w": {"value": "T2w"},
                    "bold": {"value": "bold"}
                },
                "extensions": {
                    "nii": {"value": ".nii"},
                    "niigz": {"value": ".nii.gz"},
                    "json": {"value": ".json"}
                }
            },
            "rules": {
                "files": {
                    "raw": {
                        "anat": {
                            "nonparametric": {
                                "suffixes": ["T1w", "T2w"],
                                "extensions": [".nii", ".nii.gz", ".json"],
                                "datatypes": ["anat"],
                                "entities": {"subject": "required", "session": "optional"}
                            }
                        },
                        "func": {
                            "func": {
                                "suffixes": ["bold"],
                                "extensions": [".nii.gz", ".json"],
                                "datatypes": ["func"],
                                "entities": {
                                    "subject": "required",
                                    "task": {"level": "required", "enum": ["rest"]}
                                }
                            }
                        }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_collect_rules_paths_in_order() {
        let schema = schema();
        let paths: Vec<_> = schema.file_rules().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["raw.anat.nonparametric", "raw.func.func"]);
    }

    #[test]
    fn test_entity_rule_levels() {
        let schema = schema();
        let func = &schema.file_rules()[1].rule;
        assert!(func.entities["task"].is_required());
        assert!(func.entities["subject"].is_required());

        let anat = &schema.file_rules()[0].rule;
        assert!(!anat.entities["session"].is_required());
        assert_eq!(anat.entities["session"].level(), "optional");
    }

    #[test]
    fn test_empty_filter_selects_all() {
        let schema = schema();
        assert_eq!(schema.select_rules(&SchemaFilter::new()).unwrap().len(), 2);
    }

    #[test]
    fn test_filter_by_datatype() {
        let schema = schema();
        let filter = SchemaFilter::new().with_datatypes(["func"]);
        let rules = schema.select_rules(&filter).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].path, "raw.func.func");
    }

    #[test]
    fn test_filter_by_extension_key_or_value() {
        let schema = schema();
        let by_key = SchemaFilter::new().with_extensions(["nii"]);
        let by_value = SchemaFilter::new().with_extensions([".nii"]);
        assert_eq!(schema.select_rules(&by_key).unwrap().len(), 1);
        assert_eq!(schema.select_rules(&by_value).unwrap().len(), 1);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let schema = schema();
        let filter = SchemaFilter::new()
            .with_datatypes(["anat"])
            .with_suffixes(["bold"]);
        assert!(schema.select_rules(&filter).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_filter_value_rejected() {
        let schema = schema();
        let filter = SchemaFilter::new().with_suffixes(["T3w"]);
        let err = schema.select_rules(&filter).unwrap_err();
        assert!(err.is_filter_error());
        assert!(err.to_string().contains("T3w"));
    }

    #[test]
    fn test_malformed_rule_is_parse_error() {
        let result = Schema::from_value(json!({
            "rules": {"files": {"raw": {"bad": {"suffixes": "T1w"}}}}
        }));
        assert!(result.is_err());
    }
}
