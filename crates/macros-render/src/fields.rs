//! Requirement levels for metadata and column tables.
//!
//! Page authors list the fields a table should show, in display order,
//! with a requirement level for each:
//!
//! ```json
//! {
//!   "RepetitionTime": "REQUIRED",
//!   "SliceTiming": ["RECOMMENDED", "Required for sparse sequences."]
//! }
//! ```
//!
//! The second form attaches a note that is appended to the description.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Requirement of one field: a level, optionally with a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldRequirement {
    /// `"REQUIRED"`
    Level(String),
    /// `["RECOMMENDED", "note"]`
    WithNote(String, String),
}

impl FieldRequirement {
    /// The requirement level.
    #[must_use]
    pub fn level(&self) -> &str {
        match self {
            Self::Level(level) | Self::WithNote(level, _) => level,
        }
    }

    /// The attached note, if any.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        match self {
            Self::Level(_) => None,
            Self::WithNote(_, note) => Some(note),
        }
    }
}

impl From<&str> for FieldRequirement {
    fn from(level: &str) -> Self {
        Self::Level(level.to_string())
    }
}

impl From<(&str, &str)> for FieldRequirement {
    fn from((level, note): (&str, &str)) -> Self {
        Self::WithNote(level.to_string(), note.to_string())
    }
}

/// Ordered field-name to requirement mapping.
///
/// Order is the authoring order of the JSON object.
///
/// # Examples
///
/// ```
/// use bids_macros_render::FieldInfo;
///
/// let info: FieldInfo = serde_json::from_str(
///     r#"{"TaskName": "REQUIRED", "SliceTiming": ["RECOMMENDED", "If available."]}"#,
/// )?;
/// let names: Vec<_> = info.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, ["TaskName", "SliceTiming"]);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct FieldInfo {
    entries: Vec<(String, FieldRequirement)>,
}

impl FieldInfo {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, requirement: impl Into<FieldRequirement>) -> Self {
        self.entries.push((name.into(), requirement.into()));
        self
    }

    /// Fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRequirement)> {
        self.entries.iter().map(|(name, req)| (name.as_str(), req))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no fields are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Map<String, Value>> for FieldInfo {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let entries = map
            .into_iter()
            .map(|(name, value)| {
                serde_json::from_value::<FieldRequirement>(value)
                    .map(|req| (name.clone(), req))
                    .map_err(|_| {
                        format!(
                            "field '{name}' must be a level string or a [level, note] pair"
                        )
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }
}

impl From<FieldInfo> for Map<String, Value> {
    fn from(info: FieldInfo) -> Self {
        info.entries
            .into_iter()
            .map(|(name, req)| {
                let value = match req {
                    FieldRequirement::Level(level) => Value::String(level),
                    FieldRequirement::WithNote(level, note) => {
                        Value::Array(vec![Value::String(level), Value::String(note)])
                    }
                };
                (name, value)
            })
            .collect()
    }
}

impl<N, R> FromIterator<(N, R)> for FieldInfo
where
    N: Into<String>,
    R: Into<FieldRequirement>,
{
    fn from_iter<I: IntoIterator<Item = (N, R)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, req)| (name.into(), req.into()))
                .collect(),
        }
    }
}
