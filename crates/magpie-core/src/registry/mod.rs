//! Component registry
//!
//! A [`Registry`] is built once at startup by the [`RegistryLoader`] and is
//! read-only afterwards. It keeps both the normalized entries and the raw
//! records they were derived from.

pub mod defaults;
pub mod loader;
pub mod normalize;
pub mod schema;

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use loader::{CacheTier, LoadStrategy, Payload, RegistryLoader, RemoteTier};
pub use normalize::{PayloadError, parse_payload};
pub use schema::{RegistryEntry, RegistryFile};

/// Where the current registry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrySource {
    Cache,
    Remote,
    Builtin,
}

impl fmt::Display for RegistrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RegistrySource::Cache => "cache",
            RegistrySource::Remote => "remote",
            RegistrySource::Builtin => "builtin",
        };
        f.write_str(label)
    }
}

/// The loaded catalog
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
    index: HashMap<String, usize>,
    raw_payload: Vec<Value>,
    source: RegistrySource,
    loaded_at: Option<DateTime<Utc>>,
}

impl Registry {
    /// Build from raw records.
    ///
    /// Records without a non-empty name and type stay in the raw payload but
    /// get no entry. A repeated name replaces the earlier entry in place.
    pub fn from_records(
        records: Vec<Value>,
        source: RegistrySource,
        loaded_at: Option<DateTime<Utc>>,
    ) -> Self {
        let mut entries: Vec<RegistryEntry> = Vec::with_capacity(records.len());
        let mut index = HashMap::with_capacity(records.len());

        for entry in records.iter().filter_map(RegistryEntry::from_record) {
            match index.get(&entry.name).copied() {
                Some(slot) => entries[slot] = entry,
                None => {
                    index.insert(entry.name.clone(), entries.len());
                    entries.push(entry);
                }
            }
        }

        let skipped = records.len() - entries.len();
        if skipped > 0 {
            tracing::debug!(skipped, "Registry records without name/type or duplicated");
        }

        Self {
            entries,
            index,
            raw_payload: records,
            source,
            loaded_at,
        }
    }

    /// The fallback dataset; has no load time.
    pub fn builtin() -> Self {
        Self::from_records(defaults::builtin_records(), RegistrySource::Builtin, None)
    }

    pub fn get_entry(&self, name: &str) -> Option<&RegistryEntry> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    /// Entries in normalization order
    pub fn list_entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// The records exactly as received, including rejected ones
    pub fn raw_payload(&self) -> &[Value] {
        &self.raw_payload
    }

    pub fn source(&self) -> RegistrySource {
        self.source
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
