//! Render tree normalization.
//!
//! Rewrites a raw [`RenderNode`] into a generic labeled tree that viewers and
//! the Markdown serializer can walk without knowing the dump format.

use crate::lookup::Lookup;
use crate::model::{NodeKind, TreeNode};
use crate::types::{AttrPart, Binding, Element, RenderNode};
use plaque_carton::FxHashMap;

/// Inputs needed to label nodes.
#[derive(Debug, Clone, Copy)]
pub struct TreeContext<'a> {
    /// Resolves nested component names
    pub components: &'a Lookup,
    /// Property id -> label, for bindings without a carried name
    pub properties: &'a FxHashMap<String, String>,
    /// Deepest nesting accepted before giving up
    pub max_depth: usize,
}

/// Raised when a render tree nests deeper than [`TreeContext::max_depth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthExceeded;

/// Normalize a render tree.
///
/// Returns `None` for an absent root or a root that is only a binding.
pub fn normalize_tree(
    root: Option<&RenderNode>,
    ctx: &TreeContext<'_>,
) -> Result<Option<TreeNode>, DepthExceeded> {
    let Some(RenderNode::Element(element)) = root else {
        return Ok(None);
    };

    let node = match normalize_element(element, ctx, 0)? {
        Normalized::Node(node) => node,
        Normalized::Dropped(children) => TreeNode {
            label: "[element]".to_string(),
            kind: NodeKind::Element,
            children,
        },
    };

    Ok(Some(node))
}

enum Normalized {
    Node(TreeNode),
    /// The node had nothing to show; its children are spliced into the parent.
    Dropped(Vec<TreeNode>),
}

fn normalize_node(
    node: &RenderNode,
    ctx: &TreeContext<'_>,
    depth: usize,
) -> Result<Normalized, DepthExceeded> {
    match node {
        RenderNode::Binding(binding) => Ok(Normalized::Node(binding_leaf(binding, ctx))),
        RenderNode::Element(element) => normalize_element(element, ctx, depth),
    }
}

fn normalize_element(
    element: &Element,
    ctx: &TreeContext<'_>,
    depth: usize,
) -> Result<Normalized, DepthExceeded> {
    if depth >= ctx.max_depth {
        return Err(DepthExceeded);
    }

    let mut children = Vec::with_capacity(element.children.len());
    for child in &element.children {
        match normalize_node(child, ctx, depth + 1)? {
            Normalized::Node(node) => children.push(node),
            Normalized::Dropped(grandchildren) => children.extend(grandchildren),
        }
    }

    let (label, mut kind) = element_label(element, ctx);

    let hosts_slot = element.children.iter().any(|child| {
        matches!(child, RenderNode::Binding(b) if has_text(b.slot_name.as_deref()))
    });
    if hosts_slot || element.slot.is_some() {
        kind = NodeKind::Slot;
    }

    if label.is_empty() {
        return Ok(Normalized::Dropped(children));
    }

    Ok(Normalized::Node(TreeNode {
        label,
        kind,
        children,
    }))
}

fn binding_leaf(binding: &Binding, ctx: &TreeContext<'_>) -> TreeNode {
    let label = match binding.slot_name.as_deref().map(str::trim) {
        Some(slot) if !slot.is_empty() => format!("slot: {}", slot),
        _ => format!("binds: {}", binding_name(binding, ctx)),
    };

    TreeNode {
        label,
        kind: NodeKind::Binding,
        children: Vec::new(),
    }
}

fn binding_name<'a>(binding: &'a Binding, ctx: &'a TreeContext<'_>) -> &'a str {
    match binding.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => ctx
            .properties
            .get(&binding.id)
            .map(String::as_str)
            .unwrap_or(binding.id.as_str()),
    }
}

fn element_label(element: &Element, ctx: &TreeContext<'_>) -> (String, NodeKind) {
    let mut parts: Vec<String> = Vec::new();
    let mut kind = NodeKind::Element;

    match element.slot.as_deref().map(str::trim) {
        Some(slot) if !slot.is_empty() => parts.push(format!("slot: {}", slot)),
        Some(_) => {}
        None => {
            if let Some(name) = element.display_name.as_deref().filter(|n| !n.trim().is_empty()) {
                parts.push(format!("\"{}\"", name.trim()));
            }
        }
    }

    if let Some(reference) = &element.component {
        let name = ctx
            .components
            .resolve_component_name(&reference.id, reference.name.as_deref());
        parts.push(format!("[{}]", name));
        kind = NodeKind::Component;
    } else if let Some(tag) = element.tag.as_deref().filter(|t| !t.trim().is_empty()) {
        match element.classes.first() {
            Some(class) => parts.push(format!("<{}.{}>", tag, class)),
            None => parts.push(format!("<{}>", tag)),
        }
    } else if let Some(node_type) = element.node_type.as_deref().filter(|t| !t.trim().is_empty()) {
        parts.push(format!("[{}]", node_type));
    }

    if !element.attributes.is_empty() {
        let names: Vec<String> = element
            .attributes
            .iter()
            .map(|attr| attr_part_name(&attr.name, ctx))
            .collect();
        parts.push(format!("[{}]", names.join(", ")));
    }

    if element.is_text {
        parts.push("[TEXT]".to_string());
    }

    (parts.join(" "), kind)
}

fn attr_part_name(part: &AttrPart, ctx: &TreeContext<'_>) -> String {
    match part {
        AttrPart::Literal(text) => text.clone(),
        AttrPart::Bound(binding) => format!("{{{}}}", binding_name(binding, ctx)),
        AttrPart::Other(value) => value.to_string(),
    }
}

#[inline]
fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> RenderNode {
        serde_json::from_value(value).unwrap()
    }

    fn normalize(value: serde_json::Value) -> Option<TreeNode> {
        let properties: FxHashMap<String, String> =
            [("p-title".to_string(), "Title".to_string())].into_iter().collect();
        let lookup = Lookup::default();
        let ctx = TreeContext {
            components: &lookup,
            properties: &properties,
            max_depth: 64,
        };
        normalize_tree(Some(&node(value)), &ctx).unwrap()
    }

    #[test]
    fn test_element_labels() {
        let tree = normalize(json!({
            "tag": "a",
            "displayName": "Link Block",
            "classes": ["nav-link", "is-active"],
            "attributes": [{ "name": "href", "value": "#" }, { "name": "target" }],
            "children": [
                { "tag": "span", "text": true, "children": [{ "bind": "p-title" }] },
                { "component": { "id": "c-icon", "name": "Icon" } },
                { "type": "Embed" }
            ]
        }))
        .unwrap();

        assert_eq!(tree.label, "\"Link Block\" <a.nav-link> [href, target]");
        assert_eq!(tree.kind, NodeKind::Element);
        assert_eq!(tree.children[0].label, "<span> [TEXT]");
        assert_eq!(tree.children[0].children[0].label, "binds: Title");
        assert_eq!(tree.children[0].children[0].kind, NodeKind::Binding);
        assert_eq!(tree.children[1].label, "[Icon]");
        assert_eq!(tree.children[1].kind, NodeKind::Component);
        assert_eq!(tree.children[2].label, "[Embed]");
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn test_slot_reclassification() {
        let tree = normalize(json!({
            "tag": "div",
            "displayName": "Body",
            "children": [{ "bind": "s-1", "slotName": "Content" }]
        }))
        .unwrap();

        assert_eq!(tree.kind, NodeKind::Slot);
        assert_eq!(tree.children[0].label, "slot: Content");
    }

    #[test]
    fn test_unlabeled_nodes_splice_children() {
        let tree = normalize(json!({
            "tag": "section",
            "children": [{ "children": [{ "tag": "p" }, { "tag": "img" }] }]
        }))
        .unwrap();

        let labels: Vec<_> = tree.children.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["<p>", "<img>"]);
    }

    #[test]
    fn test_binding_root_is_empty() {
        assert!(normalize(json!({ "bind": "p-title" })).is_none());
        let properties = FxHashMap::default();
        let lookup = Lookup::default();
        let ctx = TreeContext {
            components: &lookup,
            properties: &properties,
            max_depth: 8,
        };
        assert_eq!(normalize_tree(None, &ctx), Ok(None));
    }

    #[test]
    fn test_depth_limit() {
        let mut value = json!({ "tag": "span" });
        for _ in 0..10 {
            value = json!({ "tag": "div", "children": [value] });
        }
        let root = node(value);
        let properties = FxHashMap::default();
        let lookup = Lookup::default();
        let ctx = TreeContext {
            components: &lookup,
            properties: &properties,
            max_depth: 5,
        };
        assert_eq!(normalize_tree(Some(&root), &ctx), Err(DepthExceeded));
    }
}
