//! Display category heuristic.

use crate::registry::RegistryEntry;

/// Name fragments checked in order; the first hit decides.
const NAME_RULES: &[(&str, &str)] = &[
    ("button", "Button"),
    ("card", "Card"),
    ("text", "Typography"),
    ("input", "Form"),
    ("form", "Form"),
    ("dialog", "Dialog"),
    ("modal", "Dialog"),
    ("menu", "Navigation"),
    ("nav", "Navigation"),
    ("table", "Data Display"),
    ("list", "Data Display"),
    ("grid", "Layout"),
    ("layout", "Layout"),
    ("animation", "Animation"),
    ("effect", "Effect"),
];

pub const DEFAULT_CATEGORY: &str = "Other";

/// Category for an entry: `Animation` when it depends on `motion`,
/// otherwise the first matching name fragment, otherwise `Other`.
pub fn determine_category(entry: &RegistryEntry) -> &'static str {
    if entry.dependencies.iter().any(|dep| dep == "motion") {
        return "Animation";
    }

    let name = entry.name.to_lowercase();
    NAME_RULES
        .iter()
        .find(|(fragment, _)| name.contains(fragment))
        .map(|(_, category)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}
