//! Global lookup tables (pass 1).
//!
//! A single forward pass over every component builds the name, property and
//! variant maps, the component dependency graph with its transpose, and a
//! unique slug per component. Slug collision tracking lives in a
//! [`LookupContext`] that is dropped as soon as the pass is over.

use crate::types::{RawComponent, RenderNode};
use plaque_carton::{kebab_case, FxHashMap, FxHashSet, NameRegistry, OrderedMap};

/// Lookup tables shared by every per-component pass.
#[derive(Debug, Clone, Default)]
pub struct Lookup {
    /// Component id -> display name
    names: FxHashMap<String, String>,
    /// Slug per component, by input position
    slugs: Vec<String>,
    /// Property id -> label, by input position
    properties: Vec<FxHashMap<String, String>>,
    /// Variant option id -> display name, by input position
    variant_values: Vec<FxHashMap<String, String>>,
    /// Component name -> directly contained component names
    dependencies: OrderedMap<Vec<String>>,
    /// Component name -> names of components containing it
    dependents: OrderedMap<Vec<String>>,
}

/// Per-pass scratch state; lives only while [`Lookup::build`] runs.
#[derive(Debug, Default)]
struct LookupContext {
    slugs: NameRegistry,
}

impl LookupContext {
    /// Assign a slug: kebab-case name, then `group-name`, then numeric suffix.
    fn assign_slug(&mut self, component: &RawComponent) -> String {
        let mut base = kebab_case(component.display_name());
        if base.is_empty() {
            base = kebab_case(&component.id);
        }
        if base.is_empty() {
            base = "component".to_string();
        }

        if self.slugs.is_taken(&base) {
            if let Some(group) = component.group_name() {
                let qualified = kebab_case(&format!("{}-{}", group, component.display_name()));
                if !qualified.is_empty() {
                    base = qualified;
                }
            }
        }

        self.slugs.claim(&base)
    }
}

impl Lookup {
    /// Build all lookup tables from the full component list.
    pub fn build(components: &[RawComponent]) -> Self {
        let mut ctx = LookupContext::default();
        let mut lookup = Lookup::default();

        for component in components {
            lookup
                .names
                .entry(component.id.clone())
                .or_insert_with(|| component.display_name().to_string());
        }

        for component in components {
            lookup.slugs.push(ctx.assign_slug(component));

            lookup.properties.push(
                component
                    .properties
                    .iter()
                    .map(|p| (p.id.clone(), p.full_label().to_string()))
                    .collect(),
            );

            lookup.variant_values.push(
                component
                    .variants
                    .values()
                    .flatten()
                    .map(|v| (v.id.clone(), v.name.clone()))
                    .collect(),
            );

            let children = lookup.collect_children(component);
            let name = component.display_name();
            match lookup.dependencies.get(name) {
                Some(existing) => {
                    let mut merged = existing.clone();
                    for child in children {
                        if !merged.contains(&child) {
                            merged.push(child);
                        }
                    }
                    lookup.dependencies.insert(name.to_string(), merged);
                }
                None => {
                    lookup.dependencies.insert(name.to_string(), children);
                }
            }
        }

        lookup.dependents = transpose(&lookup.dependencies);

        tracing::debug!(
            components = components.len(),
            edges = lookup.dependencies.values().map(Vec::len).sum::<usize>(),
            "lookup tables built"
        );

        lookup
    }

    /// Names of the components directly rendered by `component`, first-seen order.
    fn collect_children(&self, component: &RawComponent) -> Vec<String> {
        let mut seen_ids = FxHashSet::default();
        let mut children = Vec::new();
        let mut stack: Vec<&RenderNode> = component.render.iter().collect();

        while let Some(node) = stack.pop() {
            let RenderNode::Element(element) = node else {
                continue;
            };

            if let Some(reference) = &element.component {
                if seen_ids.insert(reference.id.as_str()) {
                    let name = self.resolve_component_name(&reference.id, reference.name.as_deref());
                    if !children.contains(&name) {
                        children.push(name);
                    }
                }
            }

            stack.extend(element.children.iter().rev());
        }

        children
    }

    /// Resolve a referenced component's name: carried name, then id lookup, then id.
    pub fn resolve_component_name(&self, id: &str, carried: Option<&str>) -> String {
        match carried.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.names.get(id).cloned().unwrap_or_else(|| id.to_string()),
        }
    }

    /// Slug of the component at `index`.
    #[inline]
    pub fn slug(&self, index: usize) -> &str {
        self.slugs.get(index).map(String::as_str).unwrap_or_default()
    }

    /// Property id -> label map of the component at `index`.
    pub fn properties(&self, index: usize) -> &FxHashMap<String, String> {
        self.properties.get(index).unwrap_or_else(|| empty_map())
    }

    /// Variant option id -> display name map of the component at `index`.
    pub fn variant_values(&self, index: usize) -> &FxHashMap<String, String> {
        self.variant_values.get(index).unwrap_or_else(|| empty_map())
    }

    /// Components directly contained by `name`.
    pub fn contains(&self, name: &str) -> &[String] {
        self.dependencies.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Components that directly contain `name`.
    pub fn used_by(&self, name: &str) -> &[String] {
        self.dependents.get(name).map(Vec::as_slice).unwrap_or_default()
    }
}

fn empty_map() -> &'static FxHashMap<String, String> {
    static EMPTY: once_cell::sync::Lazy<FxHashMap<String, String>> =
        once_cell::sync::Lazy::new(FxHashMap::default);
    &EMPTY
}

/// Reverse a dependency map, keeping first-seen order on both axes.
fn transpose(dependencies: &OrderedMap<Vec<String>>) -> OrderedMap<Vec<String>> {
    let mut reverse: OrderedMap<Vec<String>> = OrderedMap::default();
    for (parent, children) in dependencies.iter() {
        for child in children {
            let mut users = reverse.get(child).cloned().unwrap_or_default();
            if !users.iter().any(|u| u == parent) {
                users.push(parent.to_string());
            }
            reverse.insert(child.clone(), users);
        }
    }
    reverse
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn component(value: serde_json::Value) -> RawComponent {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_slug_collision_uses_group_then_suffix() {
        let components = vec![
            component(json!({ "id": "a", "name": "Button", "group": "Marketing" })),
            component(json!({ "id": "b", "name": "Button", "group": "Forms" })),
            component(json!({ "id": "c", "name": "Button" })),
            component(json!({ "id": "d", "name": "Button", "group": "Forms" })),
        ];

        let lookup = Lookup::build(&components);
        assert_eq!(lookup.slug(0), "button");
        assert_eq!(lookup.slug(1), "forms-button");
        assert_eq!(lookup.slug(2), "button-2");
        assert_eq!(lookup.slug(3), "forms-button-2");
    }

    #[test]
    fn test_dependencies_first_seen_order() {
        let components = vec![
            component(json!({
                "id": "card",
                "name": "Card",
                "render": {
                    "tag": "div",
                    "children": [
                        { "component": { "id": "icon" } },
                        { "tag": "div", "children": [{ "component": { "id": "btn", "name": "Button" } }] },
                        { "component": { "id": "icon" } }
                    ]
                }
            })),
            component(json!({ "id": "btn", "name": "Button", "render": { "component": { "id": "icon" } } })),
            component(json!({ "id": "icon", "name": "Icon", "render": { "tag": "svg" } })),
        ];

        let lookup = Lookup::build(&components);
        assert_eq!(lookup.contains("Card"), ["Icon", "Button"]);
        assert_eq!(lookup.contains("Button"), ["Icon"]);
        assert!(lookup.contains("Icon").is_empty());
        assert_eq!(lookup.used_by("Icon"), ["Card", "Button"]);
        assert_eq!(lookup.used_by("Button"), ["Card"]);
        assert!(lookup.used_by("Card").is_empty());
    }

    #[test]
    fn test_property_and_variant_maps() {
        let components = vec![component(json!({
            "id": "btn",
            "name": "Button",
            "properties": [{ "id": "p1", "label": "Style/Variant", "type": "style-variant" }],
            "variants": { "p1": [{ "id": "v1", "name": "Primary" }] }
        }))];

        let lookup = Lookup::build(&components);
        assert_eq!(lookup.properties(0).get("p1").map(String::as_str), Some("Style/Variant"));
        assert_eq!(lookup.variant_values(0).get("v1").map(String::as_str), Some("Primary"));
        assert!(lookup.properties(7).is_empty());
    }

    #[test]
    fn test_unknown_reference_falls_back_to_id() {
        let components = vec![component(json!({
            "id": "page",
            "name": "Page",
            "render": { "component": { "id": "ghost" } }
        }))];

        let lookup = Lookup::build(&components);
        assert_eq!(lookup.contains("Page"), ["ghost"]);
        assert_eq!(lookup.used_by("ghost"), ["Page"]);
    }
}
