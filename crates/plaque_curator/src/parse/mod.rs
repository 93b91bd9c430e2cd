//! Parser for extractor dumps.
//!
//! Parsing happens in two stages:
//! 1. the whole document is checked for its required top-level shape; any
//!    problem here is fatal ([`ValidationError`]);
//! 2. every component is decoded on its own, so one malformed or overly
//!    deep component becomes a [`ComponentFailure`] instead of sinking the
//!    batch.

mod validate;

use crate::types::{
    Breakpoint, ComponentFailure, DocError, DumpMeta, ExtractorDump, RawComponent,
    ValidationError,
};
use plaque_carton::OrderedMap;
use serde_json::value::RawValue;
use serde_json::Value;

/// Deepest JSON nesting a single component may have.
pub const MAX_NESTING: usize = 1024;

/// Parse an extractor dump from JSON text.
///
/// # Example
///
/// ```
/// use plaque_curator::parse::parse_dump;
///
/// let source = r#"{
///   "breakpoints": { "main": {} },
///   "components": [
///     { "id": "c1", "name": "Button", "render": { "tag": "button" }, "properties": [] }
///   ]
/// }"#;
///
/// let dump = parse_dump(source).unwrap();
/// assert_eq!(dump.components.len(), 1);
/// ```
pub fn parse_dump(source: &str) -> Result<ExtractorDump, ValidationError> {
    let root = validate::validate_root(source)?;

    let meta: DumpMeta = root
        .fields
        .get("_meta")
        .and_then(|m| serde_json::from_str(m.get()).ok())
        .unwrap_or_default();

    let breakpoints_raw: Value = match root.fields.get("breakpoints") {
        Some(raw) => serde_json::from_str(raw.get()).map_err(ValidationError::Breakpoints)?,
        None => Value::Null,
    };
    let breakpoints: OrderedMap<Breakpoint> = if breakpoints_raw.is_null() {
        OrderedMap::default()
    } else {
        serde_json::from_value(breakpoints_raw.clone()).map_err(ValidationError::Breakpoints)?
    };

    let entries = &root.components;
    let mut components = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        match decode_component(entry) {
            Ok(component) => components.push(component),
            Err(err) => {
                let (name, id) = validate::component_identity(entry, index);
                tracing::warn!(component = %name, id = %id, "skipping component: {}", err);
                rejected.push(ComponentFailure::from_error(name, id, &err));
            }
        }
    }

    if let Some(expected) = meta.component_count {
        if expected != entries.len() {
            tracing::warn!(
                expected,
                actual = entries.len(),
                "_meta.componentCount does not match the components array"
            );
        }
    }

    Ok(ExtractorDump {
        meta,
        breakpoints,
        breakpoints_raw,
        components,
        rejected,
    })
}

/// Parse an extractor dump from an already-decoded JSON value.
pub fn parse_dump_value(root: Value) -> Result<ExtractorDump, ValidationError> {
    parse_dump(&root.to_string())
}

/// Decode one component, keeping its raw render and class JSON.
///
/// Components nested deeper than [`MAX_NESTING`] JSON levels are rejected
/// before any recursive decoding happens.
pub fn decode_component(raw: &RawValue) -> Result<RawComponent, DocError> {
    if nesting_depth(raw.get()) > MAX_NESTING {
        return Err(DocError::NestingTooDeep { limit: MAX_NESTING });
    }

    let value: Value = validate::from_str_unbounded(raw.get()).map_err(DocError::Decode)?;
    let mut component: RawComponent =
        serde_json::from_value(value.clone()).map_err(DocError::Decode)?;
    component.render_raw = value.get("render").cloned().unwrap_or(Value::Null);
    component.classes_raw = value.get("classes").cloned().unwrap_or(Value::Null);
    Ok(component)
}

/// Deepest bracket nesting in a JSON text, ignoring brackets inside strings.
fn nesting_depth(json: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    let mut in_string = false;
    let mut escaped = false;

    for &b in json.as_bytes() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RenderNode;

    #[test]
    fn test_parse_dump() {
        let source = r#"{
          "_meta": { "componentCount": 2 },
          "breakpoints": { "main": { "label": "Desktop" }, "small": { "maxWidth": 767 } },
          "components": [
            { "id": "c1", "name": "Button", "render": { "tag": "button" }, "properties": [] },
            { "id": "c2", "name": "Card", "group": "Layout", "render": null, "properties": [] }
          ]
        }"#;

        let dump = parse_dump(source).unwrap();
        assert_eq!(dump.meta.component_count, Some(2));
        assert_eq!(dump.components.len(), 2);
        assert!(dump.rejected.is_empty());
        assert_eq!(dump.breakpoints.keys().collect::<Vec<_>>(), vec!["main", "small"]);
        assert!(matches!(dump.components[0].render, Some(RenderNode::Element(_))));
        assert!(dump.components[1].render.is_none());
        assert_eq!(dump.components[1].group_name(), Some("Layout"));
        assert_eq!(dump.components[0].render_raw["tag"], "button");
    }

    #[test]
    fn test_malformed_component_is_rejected_not_fatal() {
        let source = r#"{
          "breakpoints": {},
          "components": [
            { "id": "c1", "name": "Button", "render": null, "properties": [] },
            { "id": "c2", "name": "Broken", "render": null, "properties": "nope" }
          ]
        }"#;

        let dump = parse_dump(source).unwrap();
        assert_eq!(dump.components.len(), 1);
        assert_eq!(dump.rejected.len(), 1);
        assert_eq!(dump.rejected[0].component_name, "Broken");
        assert_eq!(dump.rejected[0].component_id, "c2");
    }

    /// Render tree of `depth` nested `div`s.
    fn nested_render(depth: usize) -> String {
        let open = r#"{ "tag": "div", "children": ["#;
        format!("{}{}{}", open.repeat(depth), r#"{ "tag": "span" }"#, "] }".repeat(depth))
    }

    fn dump_with_render(render: &str) -> String {
        format!(
            r#"{{
              "breakpoints": {{}},
              "components": [
                {{ "id": "c1", "name": "Button", "render": null, "properties": [] }},
                {{ "id": "c2", "name": "Tower", "render": {render}, "properties": [] }}
              ]
            }}"#
        )
    }

    #[test]
    fn test_deep_render_tree_decodes() {
        let dump = parse_dump(&dump_with_render(&nested_render(150))).unwrap();
        assert_eq!(dump.components.len(), 2);
        assert!(dump.rejected.is_empty());
    }

    #[test]
    fn test_too_deep_component_is_rejected_not_fatal() {
        let dump = parse_dump(&dump_with_render(&nested_render(2000))).unwrap();
        assert_eq!(dump.components.len(), 1);
        assert_eq!(dump.components[0].display_name(), "Button");
        assert_eq!(dump.rejected.len(), 1);
        assert_eq!(dump.rejected[0].component_name, "Tower");
        assert_eq!(dump.rejected[0].component_id, "c2");
        assert!(dump.rejected[0].message.contains("maximum JSON nesting"));
    }

    #[test]
    fn test_nesting_depth_ignores_strings() {
        assert_eq!(nesting_depth(r#"{ "a": [1, { "b": "[[[{{" }] }"#), 3);
        assert_eq!(nesting_depth(r#"["\"]", []]"#), 2);
        assert_eq!(nesting_depth("42"), 0);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_dump("{ not json"),
            Err(ValidationError::Json(_))
        ));
    }
}
