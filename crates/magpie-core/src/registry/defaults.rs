//! Built-in registry used when neither the cache nor the remote delivers.

use serde_json::{Value, json};

fn record(name: &str, title: &str, description: &str, dependencies: &[&str]) -> Value {
    let mut record = json!({
        "name": name,
        "type": "registry:ui",
        "title": title,
        "description": description,
        "files": [{
            "path": format!("components/{name}/{name}.tsx"),
            "type": "registry:ui",
            "target": format!("{name}.tsx"),
        }],
    });
    if !dependencies.is_empty() {
        record["dependencies"] = json!(dependencies);
    }
    record
}

/// Records of the fallback dataset, one per common category
pub fn builtin_records() -> Vec<Value> {
    vec![
        record(
            "accordion",
            "Accordion",
            "A vertically stacked set of interactive headings that each reveal a section of content.",
            &[],
        ),
        record("alert", "Alert", "Displays a callout for user attention.", &[]),
        record(
            "shimmer-button",
            "Shimmer Button",
            "A button with a shimmering light travelling around its perimeter.",
            &[],
        ),
        record(
            "magic-card",
            "Magic Card",
            "A spotlight card that follows the mouse cursor.",
            &["motion"],
        ),
        record(
            "text-animate",
            "Text Animate",
            "Animates text on scroll or load.",
            &[],
        ),
        record(
            "grid-pattern",
            "Grid Pattern",
            "A background grid pattern made with SVGs.",
            &[],
        ),
    ]
}
