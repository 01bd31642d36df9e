//! Consumer view of the registry
//!
//! Flattens registry entries into [`Component`]s with a derived display
//! category. Used when there is no raw payload to hand out.

pub mod category;

use serde::Serialize;

use crate::registry::{Registry, RegistryFile};

pub use category::determine_category;

/// A component as presented to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub name: String,
    pub description: String,
    /// Source is fetched on demand, never at load time
    pub code: String,
    pub category: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<RegistryFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Components in registry order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    components: Vec<Component>,
}

impl Catalog {
    pub fn from_registry(registry: &Registry) -> Self {
        let components = registry
            .list_entries()
            .iter()
            .map(|entry| Component {
                name: entry.name.clone(),
                description: entry.description.clone().unwrap_or_default(),
                code: String::new(),
                category: determine_category(entry).to_string(),
                dependencies: entry.dependencies.clone(),
                files: entry.files.clone(),
                title: entry.title.clone(),
            })
            .collect();
        Self { components }
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
