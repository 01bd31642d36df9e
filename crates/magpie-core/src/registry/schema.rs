//! Registry entry schema
//!
//! Upstream records look like
//! `{ name, type, title?, description?, dependencies?, files?, ... }`.
//! Anything beyond the known fields is kept verbatim in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const KNOWN_FIELDS: [&str; 7] = [
    "name",
    "type",
    "kind",
    "title",
    "description",
    "dependencies",
    "files",
];

/// One file a component ships
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Location in the upstream repository
    pub path: String,
    /// File role, e.g. "registry:ui"
    #[serde(rename = "type")]
    pub kind: String,
    /// Where a consumer places it locally
    pub target: String,
}

impl RegistryFile {
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Some(Self {
            path: text("path"),
            kind: text("type"),
            target: text("target"),
        })
    }
}

/// Canonical registry entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub files: Vec<RegistryFile>,

    /// Fields not interpreted here (e.g. `tailwind`)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RegistryEntry {
    /// Map a raw record, or `None` when it lacks a non-empty name or type.
    ///
    /// `kind` is accepted as a spelling of `type`. Malformed optional fields
    /// are skipped rather than rejecting the record.
    pub fn from_record(record: &Value) -> Option<Self> {
        let object = record.as_object()?;
        let non_empty = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let name = non_empty("name")?;
        let kind = non_empty("type").or_else(|| non_empty("kind"))?;

        let dependencies = object
            .get("dependencies")
            .and_then(Value::as_array)
            .map(|deps| {
                deps.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let files = object
            .get("files")
            .and_then(Value::as_array)
            .map(|files| files.iter().filter_map(RegistryFile::from_value).collect())
            .unwrap_or_default();

        let extra = object
            .iter()
            .filter(|(key, _)| !KNOWN_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Some(Self {
            name,
            kind,
            title: object
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string),
            description: object
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            dependencies,
            files,
            extra,
        })
    }
}
